use std::fmt;

use crate::ruleset::{Owner, Rule, RuleSet};

/// Parse the text of an ownership rules file, returning a `ParseResult`
/// containing the parsed rules and any errors encountered.
///
/// Parsing never fails outright: blank lines and `#` comments are skipped,
/// and rule lines that cannot be understood are recorded as errors and left
/// out of the rule list. An empty source (for instance, a revision that
/// predates the rules file) parses to an empty rule list.
pub fn parse(source: &str) -> ParseResult {
    let mut rules = Vec::new();
    let mut errors = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line = index + 1;

        // Everything from the first `#` on is a comment. Patterns with an
        // embedded, escaped `#` are out of scope; owners never contain one.
        let content = raw_line.split('#').next().unwrap_or_default();
        let mut tokens = content.split_whitespace();
        let Some(pattern) = tokens.next() else {
            continue;
        };

        let mut owners = Vec::new();
        for token in tokens {
            match Owner::try_from(token) {
                Ok(owner) => owners.push(owner),
                Err(err) => errors.push(ParseError::new(err.to_string(), line)),
            }
        }

        if owners.is_empty() {
            errors.push(ParseError::new(
                format!("rule `{pattern}` has no owners"),
                line,
            ));
            continue;
        }

        rules.push(Rule {
            pattern: pattern.to_string(),
            owners,
        });
    }

    ParseResult { rules, errors }
}

/// The result of parsing a rules file: the rules that parsed cleanly and the
/// errors for every line or owner that did not. A non-empty error list means
/// some input was skipped, not that parsing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub rules: Vec<Rule>,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Convert into a `RuleSet`, discarding any errors.
    pub fn into_ruleset(self) -> RuleSet {
        RuleSet::new(self.rules)
    }
}

/// An error for a single rule line, with its one-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

impl ParseError {
    fn new(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::OwnerKind;

    fn rule(pattern: &str, owners: &[(&str, OwnerKind)]) -> Rule {
        Rule {
            pattern: pattern.to_string(),
            owners: owners
                .iter()
                .map(|&(value, kind)| Owner::new(value.to_string(), kind))
                .collect(),
        }
    }

    #[test]
    fn test_parse() {
        let examples = vec![
            ("", vec![], vec![]),
            (
                "foo @bar",
                vec![rule("foo", &[("@bar", OwnerKind::User)])],
                vec![],
            ),
            (
                "  foo   @bar  ",
                vec![rule("foo", &[("@bar", OwnerKind::User)])],
                vec![],
            ),
            (
                "a/b @c/d e@f.co",
                vec![rule(
                    "a/b",
                    &[("@c/d", OwnerKind::Team), ("e@f.co", OwnerKind::Email)],
                )],
                vec![],
            ),
            (
                "# a comment\n\nfoo @bar\n",
                vec![rule("foo", &[("@bar", OwnerKind::User)])],
                vec![],
            ),
            (
                "foo @bar # trailing comment",
                vec![rule("foo", &[("@bar", OwnerKind::User)])],
                vec![],
            ),
            (
                "foo @bar\nbar @baz\n",
                vec![
                    rule("foo", &[("@bar", OwnerKind::User)]),
                    rule("bar", &[("@baz", OwnerKind::User)]),
                ],
                vec![],
            ),
            (
                "foo bar",
                vec![],
                vec![
                    ParseError::new("invalid owner: bar", 1),
                    ParseError::new("rule `foo` has no owners", 1),
                ],
            ),
            (
                "foo",
                vec![],
                vec![ParseError::new("rule `foo` has no owners", 1)],
            ),
            (
                "foo @bar\nbare-pattern\nbar @baz",
                vec![
                    rule("foo", &[("@bar", OwnerKind::User)]),
                    rule("bar", &[("@baz", OwnerKind::User)]),
                ],
                vec![ParseError::new("rule `bare-pattern` has no owners", 2)],
            ),
            (
                "foo bogus @bar",
                vec![rule("foo", &[("@bar", OwnerKind::User)])],
                vec![ParseError::new("invalid owner: bogus", 1)],
            ),
        ];

        for (source, rules, errors) in examples {
            assert_eq!(
                parse(source),
                ParseResult { rules, errors },
                "result mismatch for `{}`",
                source
            );
        }
    }

    #[test]
    fn test_parse_error_display() {
        let result = parse("\n\nfoo\n");
        assert_eq!(
            result.errors[0].to_string(),
            "line 3: rule `foo` has no owners"
        );
    }

    #[test]
    fn test_into_ruleset_skips_errored_lines() {
        let rules = parse("foo/ @some/team\nbroken\n").into_ruleset();
        assert_eq!(rules.resolve("foo/bar.py"), vec!["@some/team"]);
        assert!(rules.resolve("broken").is_empty());
    }
}
