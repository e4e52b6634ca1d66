//! Cleanup and plausibility checks for title-derived series candidates.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use stop_words::{LANGUAGE, get};

use crate::index::sort_key_for_index;

/// Trailing bare word `series`.
#[allow(clippy::expect_used)]
static TRAILING_SERIES_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bseries\b\s*$").expect("trailing series regex is valid") // Static pattern, safe to panic
});

const EDGE_PUNCTUATION: &[char] = &[' ', '-', '–', '—', ':', ','];

/// English stopwords, lowercased.
static STOPWORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    get(LANGUAGE::English)
        .into_iter()
        .map(|word| word.trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
});

const FALSE_POSITIVE_SERIES: [&str; 8] = [
    "movie tie-in",
    "tv tie-in",
    "special edition",
    "deluxe edition",
    "collector's edition",
    "anniversary edition",
    "unabridged",
    "abridged",
];

/// Numeric indexes outside this range are implausible series positions.
const INDEX_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// Why a candidate was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Cleaned series text has two characters or fewer.
    SeriesTooShort,
    /// Cleaned series text is a lone stopword.
    SeriesIsStopword,
    /// Cleaned series text is an edition or tie-in phrase.
    FalsePositivePhrase,
    /// Numeric index outside `[0, 100]`.
    IndexOutOfRange,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeriesTooShort => write!(f, "series too short"),
            Self::SeriesIsStopword => write!(f, "series is a stopword"),
            Self::FalsePositivePhrase => write!(f, "series is a false-positive phrase"),
            Self::IndexOutOfRange => write!(f, "index out of range"),
        }
    }
}

/// Strips a trailing `series` word and edge punctuation, then collapses whitespace.
#[must_use]
pub fn clean_series(raw: &str) -> String {
    let without_word = TRAILING_SERIES_WORD.replace(raw, "");
    without_word
        .trim_matches(EDGE_PUNCTUATION)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Checks a cleaned series name and a normalized index.
///
/// Non-numeric index labels (`Prequel`) skip the range check.
///
/// # Errors
///
/// Returns the first [`Rejection`] that applies.
pub fn validate_candidate(series: &str, index: &str) -> Result<(), Rejection> {
    if series.chars().count() <= 2 {
        return Err(Rejection::SeriesTooShort);
    }

    let folded = series.to_lowercase();
    if STOPWORDS.contains(folded.as_str()) {
        return Err(Rejection::SeriesIsStopword);
    }
    if FALSE_POSITIVE_SERIES.contains(&folded.as_str()) {
        return Err(Rejection::FalsePositivePhrase);
    }

    if let Some(value) = sort_key_for_index(index)
        && !INDEX_RANGE.contains(&value)
    {
        return Err(Rejection::IndexOutOfRange);
    }

    Ok(())
}
