use std::collections::BTreeSet;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::Error;

/// Expand one changed rule pattern into the tracked files it could affect.
///
/// The pattern is normalized to a filesystem glob: a leading `/` roots it at
/// the repository top level, anything else may match at any depth. Candidates
/// come from the tracked-file listing of the current working tree, so a
/// pattern naming nothing tracked expands to the empty set without error.
pub fn affected_files(
    pattern: &str,
    tracked: &[String],
) -> Result<BTreeSet<String>, Error> {
    let globs = compile_glob(pattern)?;
    Ok(tracked
        .iter()
        .filter(|path| globs.is_match(path.as_str()))
        .cloned()
        .collect())
}

fn compile_glob(pattern: &str) -> Result<GlobSet, Error> {
    let rooted = match pattern.strip_prefix('/') {
        Some(rest) => rest.to_string(),
        None => format!("**/{pattern}"),
    };
    let base = rooted.trim_end_matches('/');

    // Two globs per pattern: one for a file the pattern names directly, one
    // for files under a directory it names.
    let mut builder = GlobSetBuilder::new();
    for glob in [base.to_string(), format!("{base}/**")] {
        builder.add(
            GlobBuilder::new(&glob)
                .literal_separator(true)
                .build()
                .map_err(|source| Error::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })?,
        );
    }
    builder.build().map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
