use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

// Leading pattern token of a rule line. Comment and blank lines have none.
static PATTERN_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([^#\s]+)").expect("valid regex"));

/// The set of distinct rule patterns whose lines differ between two versions
/// of a rules file. A rule whose owner list changed contributes its
/// (unchanged) pattern once; comment and blank lines never contribute.
///
/// The comparison is symmetric: it does not matter which text is "old".
pub fn changed_patterns(base: &str, head: &str) -> BTreeSet<String> {
    let base_lines: HashSet<&str> = base.lines().collect();
    let head_lines: HashSet<&str> = head.lines().collect();

    base_lines
        .symmetric_difference(&head_lines)
        .filter_map(|line| PATTERN_TOKEN.captures(line))
        .map(|captures| captures[1].to_string())
        .collect()
}
