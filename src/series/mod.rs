//! Series grouping, gap detection, and completion status.
//!
//! Analysis is rebuilt from scratch for every batch of records:
//!
//! - records without a series count as standalone
//! - the rest are grouped by exact trimmed series name
//! - each group is ordered by index and checked for gaps
//! - completion compares distinct known positions with the span they cover
//!
//! # Example
//!
//! ```
//! use bookshelf_core::metadata::CanonicalRecord;
//! use bookshelf_core::series::{SeriesStatus, analyze_series};
//!
//! let book = |index: &str| CanonicalRecord {
//!     series: Some("The Expanse".to_string()),
//!     series_index_display: Some(index.to_string()),
//!     ..CanonicalRecord::default()
//! };
//! let analysis = analyze_series(&[book("1"), book("2"), book("4")]);
//!
//! let group = &analysis.groups[0];
//! assert_eq!(group.completion_pct, 75.0);
//! assert_eq!(group.status, SeriesStatus::MostlyComplete);
//! assert_eq!(group.gaps[0].missing_positions(), 3..=3);
//! ```

mod gaps;
mod similar;

pub use gaps::SeriesGap;
pub use similar::{SIMILAR_SERIES_THRESHOLD, SimilarSeries, find_similar_series};

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::index::{normalize_index, sort_key_for_index};
use crate::metadata::CanonicalRecord;

/// Completion band of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesStatus {
    /// 100% or more.
    Complete,
    /// At least 75%.
    MostlyComplete,
    /// At least 50%.
    InProgress,
    /// Below 50%.
    Incomplete,
}

impl SeriesStatus {
    /// Band for an unrounded completion percentage.
    #[must_use]
    pub fn from_pct(pct: f64) -> Self {
        if pct >= 100.0 {
            Self::Complete
        } else if pct >= 75.0 {
            Self::MostlyComplete
        } else if pct >= 50.0 {
            Self::InProgress
        } else {
            Self::Incomplete
        }
    }
}

impl fmt::Display for SeriesStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::MostlyComplete => write!(f, "mostly-complete"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Incomplete => write!(f, "incomplete"),
        }
    }
}

/// All records sharing one series name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesGroup {
    /// Series name as tagged.
    pub name: String,
    /// Author of the first member.
    pub author: Option<String>,
    /// Number of member records.
    pub book_count: usize,
    /// Members in ascending index order.
    pub records: Vec<CanonicalRecord>,
    /// Missing position runs.
    pub gaps: Vec<SeriesGap>,
    /// Completion percentage, rounded to one decimal.
    pub completion_pct: f64,
    /// Completion band, derived before rounding.
    pub status: SeriesStatus,
}

/// Output of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesAnalysis {
    /// Groups, least complete first.
    pub groups: Vec<SeriesGroup>,
    /// Records with no series.
    pub standalone_count: usize,
    /// All records analyzed.
    pub total_records: usize,
    /// Groups with status complete.
    pub complete_series: usize,
    /// Groups with any other status.
    pub incomplete_series: usize,
    /// Group names that look like variants of each other.
    pub similar_series: Vec<SimilarSeries>,
}

impl SeriesAnalysis {
    /// Number of series groups.
    #[must_use]
    pub fn total_series(&self) -> usize {
        self.groups.len()
    }
}

/// Numeric position of a record, if its index has one.
fn record_position(record: &CanonicalRecord) -> Option<f64> {
    record.series_index_sort.or_else(|| {
        record
            .series_index_display
            .as_deref()
            .and_then(|display| sort_key_for_index(&normalize_index(display)))
    })
}

/// Ordering key; records without a usable index sort as 0.
fn record_sort_key(record: &CanonicalRecord) -> f64 {
    record_position(record).unwrap_or(0.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Completion over distinct positive positions; 100 when there are none.
///
/// Half-step positions can push the value above 100.
#[allow(clippy::cast_precision_loss)]
fn completion_pct(positions: &[f64]) -> f64 {
    let (Some(min), Some(max)) = (positions.first(), positions.last()) else {
        return 100.0;
    };
    let expected = (max - min + 1.0).floor();
    positions.len() as f64 / expected * 100.0
}

fn build_group(name: String, mut records: Vec<CanonicalRecord>) -> SeriesGroup {
    records.sort_by(|a, b| record_sort_key(a).total_cmp(&record_sort_key(b)));

    let positions = gaps::distinct_positive(records.iter().filter_map(record_position));
    let gaps = gaps::find_gaps(&positions);
    let pct = completion_pct(&positions);
    let status = SeriesStatus::from_pct(pct);

    debug!(series = %name, books = records.len(), pct, %status, "series analyzed");

    SeriesGroup {
        author: records.first().and_then(|record| record.author.clone()),
        book_count: records.len(),
        name,
        records,
        gaps,
        completion_pct: round_one_decimal(pct),
        status,
    }
}

/// Groups records by series and reports gaps and completion.
#[tracing::instrument(skip(records), fields(records = records.len()))]
#[must_use]
pub fn analyze_series(records: &[CanonicalRecord]) -> SeriesAnalysis {
    let mut by_series: BTreeMap<String, Vec<CanonicalRecord>> = BTreeMap::new();
    let mut standalone_count = 0;

    for record in records {
        match record.series_name() {
            Some(name) => by_series
                .entry(name.to_string())
                .or_default()
                .push(record.clone()),
            None => standalone_count += 1,
        }
    }

    let names: Vec<&str> = by_series.keys().map(String::as_str).collect();
    let similar_series = find_similar_series(&names);

    let mut groups: Vec<SeriesGroup> = by_series
        .into_iter()
        .map(|(name, members)| build_group(name, members))
        .collect();
    groups.sort_by(|a, b| {
        a.completion_pct
            .total_cmp(&b.completion_pct)
            .then_with(|| a.name.cmp(&b.name))
    });

    let complete_series = groups
        .iter()
        .filter(|group| group.status == SeriesStatus::Complete)
        .count();

    SeriesAnalysis {
        incomplete_series: groups.len() - complete_series,
        complete_series,
        standalone_count,
        total_records: records.len(),
        similar_series,
        groups,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn book(series: &str, index: Option<&str>) -> CanonicalRecord {
        CanonicalRecord {
            title: format!("{series} {}", index.unwrap_or("?")),
            series: Some(series.to_string()),
            series_index_display: index.map(ToString::to_string),
            ..CanonicalRecord::default()
        }
    }

    fn standalone(title: &str) -> CanonicalRecord {
        CanonicalRecord {
            title: title.to_string(),
            ..CanonicalRecord::default()
        }
    }

    #[test]
    fn test_analyze_reports_gap_and_mostly_complete() {
        let analysis = analyze_series(&[
            book("Expanse", Some("4")),
            book("Expanse", Some("1")),
            book("Expanse", Some("2")),
        ]);
        let group = &analysis.groups[0];
        assert_eq!(group.gaps, vec![SeriesGap { low: 2.0, high: 4.0 }]);
        assert!((group.completion_pct - 75.0).abs() < f64::EPSILON);
        assert_eq!(group.status, SeriesStatus::MostlyComplete);
        let order: Vec<_> = group
            .records
            .iter()
            .map(|r| r.series_index_display.as_deref().unwrap())
            .collect();
        assert_eq!(order, vec!["1", "2", "4"]);
    }

    #[test]
    fn test_analyze_counts_standalone_and_blank_series() {
        let mut blank = standalone("Blank");
        blank.series = Some("   ".to_string());
        let analysis = analyze_series(&[
            standalone("The Martian"),
            blank,
            book("Dune", Some("1")),
        ]);
        assert_eq!(analysis.standalone_count, 2);
        assert_eq!(analysis.total_records, 3);
        assert_eq!(analysis.total_series(), 1);
    }

    #[test]
    fn test_analyze_without_numeric_positions_is_complete() {
        let analysis = analyze_series(&[
            book("Discworld", Some("Prequel")),
            book("Discworld", None),
        ]);
        let group = &analysis.groups[0];
        assert!((group.completion_pct - 100.0).abs() < f64::EPSILON);
        assert_eq!(group.status, SeriesStatus::Complete);
        assert!(group.gaps.is_empty());
        assert_eq!(group.book_count, 2);
    }

    #[test]
    fn test_analyze_half_steps_exceed_one_hundred() {
        let analysis = analyze_series(&[
            book("Mercy Thompson", Some("1")),
            book("Mercy Thompson", Some("1.5")),
            book("Mercy Thompson", Some("2")),
        ]);
        let group = &analysis.groups[0];
        assert!((group.completion_pct - 150.0).abs() < f64::EPSILON);
        assert_eq!(group.status, SeriesStatus::Complete);
    }

    #[test]
    fn test_analyze_status_uses_unrounded_pct() {
        // 2 of 3 positions: 66.666... rounds to 66.7.
        let analysis = analyze_series(&[book("Trilogy", Some("1")), book("Trilogy", Some("3"))]);
        let group = &analysis.groups[0];
        assert!((group.completion_pct - 66.7).abs() < 1e-9);
        assert_eq!(group.status, SeriesStatus::InProgress);
    }

    #[test]
    fn test_analyze_orders_least_complete_first() {
        let analysis = analyze_series(&[
            book("Zeta", Some("1")),
            book("Zeta", Some("2")),
            book("Alpha", Some("1")),
            book("Alpha", Some("2")),
            book("Gappy", Some("1")),
            book("Gappy", Some("10")),
        ]);
        let names: Vec<_> = analysis.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Gappy", "Alpha", "Zeta"]);
        assert_eq!(analysis.complete_series, 2);
        assert_eq!(analysis.incomplete_series, 1);
        assert_eq!(analysis.groups[0].status, SeriesStatus::Incomplete);
    }

    #[test]
    fn test_analyze_keeps_near_duplicates_separate_but_flags_them() {
        let analysis = analyze_series(&[
            book("The Expanse", Some("1")),
            book("The Expanse.", Some("2")),
        ]);
        assert_eq!(analysis.total_series(), 2);
        assert_eq!(analysis.similar_series.len(), 1);
    }

    #[test]
    fn test_analyze_uses_sort_key_and_first_author() {
        let mut first = book("Stormlight", Some("V"));
        first.author = Some("Brandon Sanderson".to_string());
        let mut second = book("Stormlight", Some("1"));
        second.author = Some("Someone Else".to_string());
        second.series_index_sort = Some(1.0);

        let analysis = analyze_series(&[first, second]);
        let group = &analysis.groups[0];
        assert_eq!(group.records[0].series_index_display.as_deref(), Some("1"));
        assert_eq!(group.author.as_deref(), Some("Someone Else"));
        assert_eq!(group.gaps[0].missing_positions(), 2..=4);
    }

    #[test]
    fn test_analyze_huge_vendor_index_yields_bounded_gap() {
        let analysis = analyze_series(&[
            book("Endless", Some("1")),
            book("Endless", Some("5000000000000")),
        ]);
        let gap = analysis.groups[0].gaps[0];
        assert_eq!(
            gap,
            SeriesGap {
                low: 1.0,
                high: 5_000_000_000_000.0
            }
        );
        assert_eq!(gap.missing_count(), 4_999_999_999_998);
        assert_eq!(gap.missing_positions().next(), Some(2));
    }

    #[test]
    fn test_series_status_json_and_display() {
        assert_eq!(
            serde_json::to_string(&SeriesStatus::MostlyComplete).unwrap(),
            r#""mostly-complete""#
        );
        assert_eq!(SeriesStatus::InProgress.to_string(), "in-progress");
    }
}
