//! Series and index extraction from free-text titles.
//!
//! Parsing runs in three stages:
//!
//! 1. Exclusion rules: tie-ins, editions and similar markers end parsing
//!    immediately.
//! 2. Pattern cascade: [`patterns`] are tried in order and the first
//!    candidate that survives cleanup and [`validation`] wins.
//! 3. Index normalization of the winning token.
//!
//! A title that yields nothing is a standalone work, not an error.
//!
//! # Example
//!
//! ```
//! use bookshelf_core::title::parse_series_and_index;
//!
//! assert_eq!(
//!     parse_series_and_index("The Stormlight Archive (Book 5)"),
//!     (Some("The Stormlight Archive".to_string()), Some("5".to_string()))
//! );
//! assert_eq!(parse_series_and_index("The Martian"), (None, None));
//! ```

mod exclusions;
pub mod patterns;
mod validation;

pub use exclusions::{ExclusionRule, matching_exclusion};
pub use patterns::{RawCandidate, TitlePattern, default_patterns};
pub use validation::{Rejection, clean_series, validate_candidate};

use std::sync::LazyLock;

use tracing::debug;

use crate::index::normalize_index;

/// A validated series match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMatch {
    /// Cleaned series name.
    pub series: String,
    /// Normalized index display value.
    pub index: String,
    /// Name of the pattern that produced the match.
    pub pattern: &'static str,
}

/// Outcome of parsing one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleVerdict {
    /// An exclusion rule fired; no patterns were tried.
    Excluded {
        /// Name of the rule that fired.
        rule: &'static str,
    },
    /// No pattern produced a valid candidate.
    NoMatch,
    /// A pattern produced a valid candidate.
    Matched(TitleMatch),
}

impl TitleVerdict {
    /// Collapses the verdict into an optional `(series, index)` pair.
    #[must_use]
    pub fn into_pair(self) -> (Option<String>, Option<String>) {
        match self {
            Self::Matched(found) => (Some(found.series), Some(found.index)),
            Self::Excluded { .. } | Self::NoMatch => (None, None),
        }
    }
}

enum Cascade {
    Default,
    Custom(Vec<TitlePattern>),
}

/// Ordered pattern cascade over titles.
pub struct TitleParser {
    cascade: Cascade,
}

impl Default for TitleParser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TitleParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleParser")
            .field("patterns", &self.pattern_names())
            .finish()
    }
}

impl TitleParser {
    /// Parser using the built-in cascade.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cascade: Cascade::Default,
        }
    }

    /// Parser using a caller-supplied cascade, tried in the given order.
    #[must_use]
    pub fn with_patterns(patterns: Vec<TitlePattern>) -> Self {
        Self {
            cascade: Cascade::Custom(patterns),
        }
    }

    fn patterns(&self) -> &[TitlePattern] {
        match &self.cascade {
            Cascade::Default => patterns::DEFAULT_PATTERNS.as_slice(),
            Cascade::Custom(patterns) => patterns,
        }
    }

    /// Pattern names in cascade order.
    #[must_use]
    pub fn pattern_names(&self) -> Vec<&'static str> {
        self.patterns().iter().map(TitlePattern::name).collect()
    }

    /// Parses `title` and reports how the result was reached.
    #[tracing::instrument(skip(self, title), fields(title_len = title.len()))]
    #[must_use]
    pub fn parse(&self, title: &str) -> TitleVerdict {
        let title = title.trim();
        if title.is_empty() {
            return TitleVerdict::NoMatch;
        }

        if let Some(rule) = matching_exclusion(title) {
            debug!(rule = rule.name, "title excluded from series parsing");
            return TitleVerdict::Excluded { rule: rule.name };
        }

        for pattern in self.patterns() {
            let Some(candidate) = pattern.extract(title) else {
                continue;
            };

            let series = clean_series(&candidate.series);
            let index = normalize_index(&candidate.index);
            match validate_candidate(&series, &index) {
                Ok(()) => {
                    debug!(pattern = pattern.name(), %series, %index, "title matched");
                    return TitleVerdict::Matched(TitleMatch {
                        series,
                        index,
                        pattern: pattern.name(),
                    });
                }
                Err(rejection) => {
                    debug!(pattern = pattern.name(), %series, %rejection, "candidate rejected");
                }
            }
        }

        TitleVerdict::NoMatch
    }
}

static DEFAULT_PARSER: LazyLock<TitleParser> = LazyLock::new(TitleParser::new);

/// Parses `title` with the built-in cascade.
///
/// Returns `(None, None)` for excluded and standalone titles.
#[must_use]
pub fn parse_series_and_index(title: &str) -> (Option<String>, Option<String>) {
    DEFAULT_PARSER.parse(title).into_pair()
}
