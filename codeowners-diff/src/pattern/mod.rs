mod wildcard;

/// A compiled CODEOWNERS path pattern.
///
/// The dialect follows the rules file format: a leading `/` anchors the
/// pattern to the repository root, a pattern without one may match at any
/// depth, a trailing `/` matches only paths under that directory, `*` and `?`
/// match within a path segment, and `**` spans segments.
#[derive(Debug, Clone)]
pub struct Pattern {
    segments: Vec<Segment>,
    anchored: bool,
    // A trailing slash (or final `**`) requires at least one path segment
    // below the matched prefix.
    requires_descendant: bool,
    // Patterns not ending in a lone `*` also own everything under the paths
    // they name. This mirrors the CODEOWNERS deviation from gitignore: a
    // trailing single wildcard matches one level only.
    matches_descendants: bool,
}

#[derive(Debug, Clone)]
enum Segment {
    // A `**` component: spans zero or more whole path segments.
    AnyDepth,
    Glob(String),
}

impl Pattern {
    pub fn new(pattern: &str) -> Self {
        let (body, anchored) = match pattern.strip_prefix('/') {
            Some(rest) => (rest, true),
            None => (pattern, false),
        };
        let (body, trailing_slash) = match body.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (body, false),
        };

        // Rules files use Unix separators regardless of platform.
        let raw_segments: Vec<&str> = body.split('/').collect();
        let last = raw_segments.last().copied().unwrap_or_default();

        Self {
            segments: raw_segments
                .iter()
                .map(|&seg| match seg {
                    "**" => Segment::AnyDepth,
                    _ => Segment::Glob(seg.to_string()),
                })
                .collect(),
            anchored,
            requires_descendant: trailing_slash || last == "**",
            matches_descendants: last != "*",
        }
    }

    /// Whether this pattern applies to a repository-relative file path.
    /// Pure function of the compiled pattern and the path.
    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();
        if self.anchored {
            self.matches_from(0, &parts)
        } else {
            // No anchor: the pattern may start at any directory depth, as if
            // it were written with a `**/` prefix.
            (0..=parts.len()).any(|depth| self.matches_from(0, &parts[depth..]))
        }
    }

    fn matches_from(&self, index: usize, parts: &[&str]) -> bool {
        let Some(segment) = self.segments.get(index) else {
            let min_below = usize::from(self.requires_descendant);
            return parts.len() >= min_below
                && (self.matches_descendants || parts.len() == min_below);
        };

        match segment {
            Segment::AnyDepth => {
                (0..=parts.len()).any(|skip| self.matches_from(index + 1, &parts[skip..]))
            }
            Segment::Glob(glob) => match parts.split_first() {
                Some((first, rest)) => {
                    wildcard::matches(glob, first) && self.matches_from(index + 1, rest)
                }
                None => false,
            },
        }
    }
}

/// Convenience form of [`Pattern::matches`] for one-off checks.
pub fn matches(pattern: &str, path: &str) -> bool {
    Pattern::new(pattern).matches(path)
}
