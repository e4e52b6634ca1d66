//! Structural title patterns, tried in priority order.
//!
//! Each [`TitlePattern`] is an independent matcher/extractor pair. Patterns
//! name their capture slots explicitly; when a pattern has alternative
//! branches it lists several slot names and the first non-empty one wins.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Position keyword, optionally plural (`Book`, `Books`, `Vol.`, `Part`).
const KEYWORD_PLURAL: &str = r"(?:(?:book|bk\.?|volume|vol\.?|novella|part)s?\s*)";

/// Position keyword, singular only.
const KEYWORD: &str = r"(?:(?:book|bk\.?|volume|vol\.?|novella|part)\s*)";

/// Integer or decimal.
const NUMBER: &str = r"[0-9]+(?:\.[0-9]+)?";

/// Raw text extracted by a pattern before cleanup and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    /// Series text as captured.
    pub series: String,
    /// Index token as captured.
    pub index: String,
}

/// One structural title pattern.
#[derive(Debug)]
pub struct TitlePattern {
    name: &'static str,
    regex: Regex,
    series_slots: &'static [&'static str],
    index_slots: &'static [&'static str],
    reject_spaced_dash_series: bool,
}

impl TitlePattern {
    /// Compiles a pattern with ordered series and index slot names.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for an invalid pattern.
    pub fn new(
        name: &'static str,
        pattern: &str,
        series_slots: &'static [&'static str],
        index_slots: &'static [&'static str],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
            series_slots,
            index_slots,
            reject_spaced_dash_series: false,
        })
    }

    /// Rejects matches whose series capture contains ` - `, ` – `, or ` — `.
    #[must_use]
    pub fn rejecting_spaced_dash_series(mut self) -> Self {
        self.reject_spaced_dash_series = true;
        self
    }

    /// Stable pattern name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Matches `title` and pulls out the series and index slots.
    ///
    /// Returns `None` when the regex does not match, a slot is empty, or the
    /// series guard rejects the capture.
    #[must_use]
    pub fn extract(&self, title: &str) -> Option<RawCandidate> {
        let captures = self.regex.captures(title)?;
        let series = first_slot(&captures, self.series_slots)?;
        let index = first_slot(&captures, self.index_slots)?;

        if self.reject_spaced_dash_series && has_spaced_dash(series) {
            return None;
        }

        Some(RawCandidate {
            series: series.to_string(),
            index: index.to_string(),
        })
    }
}

fn first_slot<'t>(captures: &Captures<'t>, slots: &[&str]) -> Option<&'t str> {
    slots
        .iter()
        .filter_map(|slot| captures.name(slot))
        .map(|m| m.as_str())
        .find(|text| !text.trim().is_empty())
}

fn has_spaced_dash(text: &str) -> bool {
    [" - ", " – ", " — "].iter().any(|dash| text.contains(*dash))
}

#[allow(clippy::expect_used)]
fn compile(
    name: &'static str,
    pattern: &str,
    series_slots: &'static [&'static str],
    index_slots: &'static [&'static str],
) -> TitlePattern {
    TitlePattern::new(name, pattern, series_slots, index_slots)
        .expect("built-in title pattern is valid") // Static pattern, safe to panic
}

/// Builds the default cascade, most specific first.
#[must_use]
pub fn default_patterns() -> Vec<TitlePattern> {
    let token = format!(r"[IVXLCM]+|{NUMBER}|[A-Za-z]+(?:\s+[A-Za-z]+)?");
    let range_or_token = format!(r"{NUMBER}\s*[-–—]\s*{NUMBER}|{token}");
    let trailer = r"(?:\s*$|[^\w])";

    vec![
        // "The Gender Game 2: The Gender Secret"
        compile(
            "series_number_colon",
            &format!(r"(?i)^\s*(?P<series>.+?)\s+(?P<idx>{NUMBER})\s*:\s*.+$"),
            &["series"],
            &["idx"],
        ),
        // "Avenging Home - The Survivalist Series, Book 7"
        compile(
            "dash_series_comma_book",
            &format!(
                r"(?i)^.+?\s[-–—]\s(?P<series>[^,()]+?)\s*,\s*{KEYWORD_PLURAL}(?P<idx>{range_or_token}){trailer}"
            ),
            &["series"],
            &["idx"],
        ),
        // "The Stormlight Archive (Book 5)" / "Foundation [Book IV]"
        compile(
            "series_paren_book",
            &format!(
                r"(?i)^\s*(?P<series>.+?)\s*(?:\(\s*{KEYWORD}(?P<idx>{token})\s*\)|\[\s*{KEYWORD}(?P<idx_bracket>{token})\s*\])\s*$"
            ),
            &["series"],
            &["idx", "idx_bracket"],
        ),
        // "Leviathan Wakes (The Expanse #1)"
        compile(
            "paren_series_hash",
            &format!(
                r"(?i).+?\((?P<series>[^()#]+?)\s*[,#]?\s*#\s*(?P<idx>{NUMBER}|[IVXLCM]+|[A-Za-z]+(?:\s+[A-Za-z]+)?)\)"
            ),
            &["series"],
            &["idx"],
        ),
        // "The Expanse: Book 3"
        compile(
            "series_colon_book",
            &format!(
                r"(?i)^\s*(?P<series>[^:()]+?)\s*:\s*{KEYWORD_PLURAL}(?P<idx>{range_or_token}){trailer}"
            ),
            &["series"],
            &["idx"],
        )
        .rejecting_spaced_dash_series(),
        // "Vigil - Mercy Thompson: Book 4"
        compile(
            "dash_series_colon_book",
            &format!(
                r"(?i)^.+?\s[-–—]\s(?P<series>[^:()]+?)\s*:\s*{KEYWORD_PLURAL}(?P<idx>{range_or_token}){trailer}"
            ),
            &["series"],
            &["idx"],
        ),
        // "Oathbringer - Book Three of the Stormlight Archive"
        compile(
            "book_of_series",
            &format!(
                r"(?i)^.+?\s[-–—]\s{KEYWORD}(?P<idx>[IVXLCM]+|{NUMBER}|[A-Za-z]+)\s*(?:of|in)\s+(?:the\s+)?(?P<series>[^,()]+?)\s*$"
            ),
            &["series"],
            &["idx"],
        ),
        // "Dune: 2" - most ambiguous, last resort
        compile(
            "series_colon_number",
            r"(?i)^\s*(?P<series>[^:()]+?)\s*:\s*(?P<idx>[IVXLCM]+|[0-9]+)\s*$",
            &["series"],
            &["idx"],
        ),
    ]
}

/// Shared default cascade.
pub(crate) static DEFAULT_PATTERNS: LazyLock<Vec<TitlePattern>> = LazyLock::new(default_patterns);
