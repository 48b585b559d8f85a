use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::{
    diff::changed_patterns, error::Error, expand::affected_files, parser,
    repo::Repository, ruleset::RuleSet,
};

/// The files whose resolved owners differ between two revisions' rule sets,
/// keyed by path. Only differing files appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipDiff {
    pub base_ref: String,
    pub head_ref: String,
    pub changes: BTreeMap<String, OwnerChange>,
}

/// The resolved owner tuples of one file under each revision. Tuples are
/// order-sensitive: reordering owners without changing membership counts as
/// a change, matching the explicit ordering in the rules file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerChange {
    pub base: Vec<String>,
    pub head: Vec<String>,
}

impl OwnershipDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Compare effective ownership between two revisions of a repository.
///
/// Each rules-file text is fetched exactly once. A revision without a rules
/// file contributes an empty rule set; only an unresolvable revision or a
/// failing repository call is an error.
pub fn compare<R: Repository>(
    repo: &R,
    base_ref: &str,
    head_ref: &str,
) -> Result<OwnershipDiff, Error> {
    let base_text = repo.rules_file(base_ref)?.unwrap_or_default();
    let head_text = repo.rules_file(head_ref)?.unwrap_or_default();

    let mut diff = OwnershipDiff {
        base_ref: base_ref.to_string(),
        head_ref: head_ref.to_string(),
        changes: BTreeMap::new(),
    };

    let patterns = changed_patterns(&base_text, &head_text);
    if patterns.is_empty() {
        return Ok(diff);
    }
    debug!(count = patterns.len(), "rule lines changed");

    let tracked = repo.tracked_files()?;
    let mut candidates = BTreeSet::new();
    for pattern in &patterns {
        match affected_files(pattern, &tracked) {
            Ok(files) => candidates.extend(files),
            Err(err) => warn!("skipping pattern: {err}"),
        }
    }
    debug!(count = candidates.len(), "candidate files");

    let base_rules = ruleset_for(&base_text, base_ref);
    let head_rules = ruleset_for(&head_text, head_ref);

    for file in candidates {
        let base = base_rules.resolve(&file);
        let head = head_rules.resolve(&file);
        if base != head {
            diff.changes.insert(file, OwnerChange { base, head });
        }
    }

    Ok(diff)
}

fn ruleset_for(text: &str, rev: &str) -> RuleSet {
    let parsed = parser::parse(text);
    for err in &parsed.errors {
        warn!(%rev, "skipping rules-file input: {err}");
    }
    parsed.into_ruleset()
}
