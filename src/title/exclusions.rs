//! Markers that disqualify a title from series parsing.

use std::sync::LazyLock;

use regex::Regex;

/// A named disqualifying marker.
#[derive(Debug)]
pub struct ExclusionRule {
    /// Stable rule name for diagnostics.
    pub name: &'static str,
    regex: Regex,
}

impl ExclusionRule {
    /// Returns true if the rule fires on `title`.
    #[must_use]
    pub fn is_match(&self, title: &str) -> bool {
        self.regex.is_match(title)
    }
}

#[allow(clippy::expect_used)]
fn rule(name: &'static str, pattern: &str) -> ExclusionRule {
    ExclusionRule {
        name,
        regex: Regex::new(pattern).expect("title exclusion regex is valid"), // Static pattern, safe to panic
    }
}

static EXCLUSION_RULES: LazyLock<Vec<ExclusionRule>> = LazyLock::new(|| {
    vec![
        rule("tie_in", r"(?i)\((?:movie|tv|television)\s+tie[-\s]?in\)"),
        rule(
            "special_edition",
            r"(?i)\((?:special|deluxe|collector'?s?|anniversary|limited)\s+edition\)",
        ),
        rule("abridgement", r"(?i)\((?:un)?abridged\)"),
        rule(
            "standalone_descriptor",
            r"(?i)\([^)]*(?:novel|story|tale|memoir|biography|autobiography)[^)]*\)",
        ),
        rule("year", r"\([0-9]{4}\)"),
        rule(
            "publisher_format",
            r"(?i)\((?:audible|kindle|paperback|hardcover|audio)\s+[^)]*\)",
        ),
    ]
});

/// Returns the first exclusion rule that fires on `title`, if any.
#[must_use]
pub fn matching_exclusion(title: &str) -> Option<&'static ExclusionRule> {
    EXCLUSION_RULES.iter().find(|rule| rule.is_match(title))
}
