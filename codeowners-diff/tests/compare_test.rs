use std::collections::BTreeMap;

use codeowners_diff::{compare, render_lines, Error, Repository};

/// In-memory stand-in for a git repository: rules-file texts keyed by
/// revision, plus a fixed tracked-file listing.
struct MemoryRepo {
    rules: BTreeMap<&'static str, &'static str>,
    files: &'static [&'static str],
}

impl MemoryRepo {
    fn new(rules: &[(&'static str, &'static str)], files: &'static [&'static str]) -> Self {
        Self {
            rules: rules.iter().copied().collect(),
            files,
        }
    }
}

impl Repository for MemoryRepo {
    fn rules_file(&self, rev: &str) -> Result<Option<String>, Error> {
        Ok(self.rules.get(rev).map(|text| text.to_string()))
    }

    fn tracked_files(&self) -> Result<Vec<String>, Error> {
        Ok(self.files.iter().map(|path| path.to_string()).collect())
    }
}

#[test]
fn test_unchanged_rules_produce_an_empty_diff() {
    let repo = MemoryRepo::new(
        &[("base", "foo/ @some/team\n"), ("head", "foo/ @some/team\n")],
        &["foo/bar.py"],
    );

    let diff = compare(&repo, "base", "head").unwrap();

    assert!(diff.is_empty());
    assert_eq!(
        render_lines(&diff, None),
        vec!["No files have changed ownership."]
    );
}

#[test]
fn test_owner_swap_flags_owned_files() {
    let repo = MemoryRepo::new(
        &[
            ("base", "foo/ @some/team\n"),
            ("head", "foo/ @another/team\n"),
        ],
        &["foo/bar.py"],
    );

    let diff = compare(&repo, "base", "head").unwrap();

    assert_eq!(diff.changes.len(), 1);
    let change = &diff.changes["foo/bar.py"];
    assert_eq!(change.base, vec!["@some/team"]);
    assert_eq!(change.head, vec!["@another/team"]);
}

#[test]
fn test_new_rule_only_affects_files_it_matches() {
    let repo = MemoryRepo::new(
        &[
            ("base", "foo/ @some/team\n"),
            ("head", "foo/ @some/team\nfoo/bar/ @some-user\n"),
        ],
        &["foo/bar/baz.py", "foo/other.py"],
    );

    let diff = compare(&repo, "base", "head").unwrap();

    let change = &diff.changes["foo/bar/baz.py"];
    assert_eq!(change.base, vec!["@some/team"]);
    assert_eq!(change.head, vec!["@some-user"]);

    // Still owned by `foo/` in both revisions, and not matched by the one
    // changed pattern, so it is not even a candidate.
    assert!(!diff.changes.contains_key("foo/other.py"));
    assert_eq!(diff.changes.len(), 1);
}

#[test]
fn test_reordered_owners_count_as_a_change() {
    let repo = MemoryRepo::new(
        &[
            ("base", "* @alpha-user @beta-user\n"),
            ("head", "* @beta-user @alpha-user\n"),
        ],
        &["anything.py"],
    );

    let diff = compare(&repo, "base", "head").unwrap();

    let change = &diff.changes["anything.py"];
    assert_eq!(change.base, vec!["@alpha-user", "@beta-user"]);
    assert_eq!(change.head, vec!["@beta-user", "@alpha-user"]);
}

#[test]
fn test_revision_without_rules_file_owns_nothing() {
    let repo = MemoryRepo::new(
        &[("head", "foo/ @some/team\n")],
        &["foo/bar.py"],
    );

    let diff = compare(&repo, "base", "head").unwrap();

    let change = &diff.changes["foo/bar.py"];
    assert!(change.base.is_empty());
    assert_eq!(change.head, vec!["@some/team"]);
}

#[test]
fn test_malformed_rule_lines_are_skipped() {
    let repo = MemoryRepo::new(
        &[
            ("base", "foo/ @some/team\n"),
            ("head", "foo/ @some/team\nfoo/bar/\n"),
        ],
        &["foo/bar/baz.py"],
    );

    // The ownerless `foo/bar/` line still counts as a changed pattern, but
    // contributes no rule, so ownership is unchanged.
    let diff = compare(&repo, "base", "head").unwrap();
    assert!(diff.is_empty());
}

#[test]
fn test_rendered_report_end_to_end() {
    let repo = MemoryRepo::new(
        &[
            ("branch-a", "* @some-user\n"),
            ("branch-b", "* @another/team\n"),
        ],
        &["source_code.py"],
    );

    let diff = compare(&repo, "branch-a", "branch-b").unwrap();

    assert_eq!(
        render_lines(&diff, None).join("\n"),
        "\
1 files have changed ownership:

| file             | `branch-a`   | `branch-b`    |
|:-----------------|:-------------|:--------------|
| `source_code.py` | @some-user   | @another/team |"
    );
}
