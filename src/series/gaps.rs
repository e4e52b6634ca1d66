//! Gap detection over numeric series positions.

use std::ops::RangeInclusive;

use serde::Serialize;

/// Positions closer than `1 + GAP_TOLERANCE` apart are treated as consecutive.
const GAP_TOLERANCE: f64 = 0.1;

/// A run of missing positions between two known ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesGap {
    /// Last known position before the gap.
    pub low: f64,
    /// First known position after the gap.
    pub high: f64,
}

impl SeriesGap {
    /// Integer positions strictly between the bounds, as a lazy range.
    ///
    /// Vendor indexes are unbounded, so the span can be arbitrarily wide;
    /// check [`missing_count`](Self::missing_count) before collecting.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn missing_positions(&self) -> RangeInclusive<i64> {
        let first = (self.low.floor() as i64).saturating_add(1);
        let last = (self.high.ceil() as i64).saturating_sub(1);
        first..=last
    }

    /// Number of integer positions strictly between the bounds.
    #[must_use]
    pub fn missing_count(&self) -> u64 {
        let range = self.missing_positions();
        if range.is_empty() {
            return 0;
        }
        let span = i128::from(*range.end()) - i128::from(*range.start()) + 1;
        u64::try_from(span).unwrap_or(u64::MAX)
    }
}

/// Distinct positive keys in ascending order.
pub(crate) fn distinct_positive(keys: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut positive: Vec<f64> = keys.into_iter().filter(|key| *key > 0.0).collect();
    positive.sort_by(f64::total_cmp);
    positive.dedup();
    positive
}

/// Gaps between consecutive entries of an ascending, deduplicated key list.
pub(crate) fn find_gaps(sorted_keys: &[f64]) -> Vec<SeriesGap> {
    sorted_keys
        .windows(2)
        .filter(|pair| pair[1] > pair[0] + 1.0 + GAP_TOLERANCE)
        .map(|pair| SeriesGap {
            low: pair[0],
            high: pair[1],
        })
        .collect()
}
