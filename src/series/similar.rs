//! Near-duplicate series name flagging.
//!
//! Grouping is exact-match only. Names that look like variants of each
//! other are reported here so a person can fix the tags; they are never
//! merged automatically.

use serde::Serialize;

/// Names at or above this similarity are flagged.
pub const SIMILAR_SERIES_THRESHOLD: f64 = 0.9;

/// Two series names that probably refer to the same series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarSeries {
    /// Name that sorts first.
    pub first: String,
    /// Name that sorts second.
    pub second: String,
    /// Normalized Levenshtein similarity of the folded names (1.0 when they fold equal).
    pub similarity: f64,
}

/// Lowercases, drops punctuation, and collapses whitespace.
fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|ch| ch.is_alphanumeric() || ch.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flags every pair of distinct names that fold equal or are nearly equal.
///
/// `names` should already be distinct; pairs are reported in input order.
#[must_use]
pub fn find_similar_series(names: &[&str]) -> Vec<SimilarSeries> {
    let folded: Vec<String> = names.iter().map(|name| fold_name(name)).collect();
    let mut flagged = Vec::new();

    for (i, left) in folded.iter().enumerate() {
        for (j, right) in folded.iter().enumerate().skip(i + 1) {
            if left.is_empty() || right.is_empty() {
                continue;
            }
            let similarity = if left == right {
                1.0
            } else {
                strsim::normalized_levenshtein(left, right)
            };
            if similarity >= SIMILAR_SERIES_THRESHOLD {
                flagged.push(SimilarSeries {
                    first: names[i].to_string(),
                    second: names[j].to_string(),
                    similarity,
                });
            }
        }
    }

    flagged
}
