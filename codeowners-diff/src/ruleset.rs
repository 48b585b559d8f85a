use std::fmt;

use crate::pattern::Pattern;

/// One ownership rule: a path pattern and the owners declared for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: String,
    pub owners: Vec<Owner>,
}

/// An owner identifier, classified by its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub value: String,
    pub kind: OwnerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    User,
    Team,
    Email,
}

impl Owner {
    pub fn new(value: String, kind: OwnerKind) -> Self {
        Self { value, kind }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOwner(String);

impl fmt::Display for InvalidOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid owner: {}", self.0)
    }
}

impl std::error::Error for InvalidOwner {}

impl TryFrom<&str> for Owner {
    type Error = InvalidOwner;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let kind = match value.strip_prefix('@') {
            Some("") => return Err(InvalidOwner(value.to_string())),
            Some(rest) if rest.contains('/') => OwnerKind::Team,
            Some(_) => OwnerKind::User,
            None if value.contains('@') => OwnerKind::Email,
            None => return Err(InvalidOwner(value.to_string())),
        };
        Ok(Owner::new(value.to_string(), kind))
    }
}

/// An ordered set of ownership rules. Order is significant: when several
/// rules match a path, the last one declared wins.
#[derive(Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    patterns: Vec<Pattern>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        let patterns = rules.iter().map(|rule| Pattern::new(&rule.pattern)).collect();
        Self { rules, patterns }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The owners of the last-declared rule matching `path`, or the empty
    /// slice when no rule matches.
    pub fn owners(&self, path: &str) -> &[Owner] {
        self.rules
            .iter()
            .zip(&self.patterns)
            .rev()
            .find(|(_, pattern)| pattern.matches(path))
            .map(|(rule, _)| rule.owners.as_slice())
            .unwrap_or(&[])
    }

    /// The resolved owner tuple for `path`: owner identifiers in declaration
    /// order. Comparing two tuples is order-sensitive.
    pub fn resolve(&self, path: &str) -> Vec<String> {
        self.owners(path).iter().map(|owner| owner.value.clone()).collect()
    }
}
