//! Collection-wide statistics over resolved records.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::metadata::{CanonicalRecord, duration_minutes};

/// Default length of each top-N list.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// One entry of a top-N list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    /// Field value.
    pub name: String,
    /// Number of records carrying it.
    pub count: usize,
}

/// Earliest and latest year text, compared lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearRange {
    /// Smallest year value.
    pub first: String,
    /// Largest year value.
    pub last: String,
}

/// Record counts per length band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DurationBuckets {
    /// Under 5 hours.
    pub under_5h: usize,
    /// 5 to 10 hours.
    pub from_5h_to_10h: usize,
    /// Over 10, up to 15 hours.
    pub from_11h_to_15h: usize,
    /// Over 15, up to 24 hours.
    pub from_16h_to_24h: usize,
    /// Over 24 hours.
    pub over_24h: usize,
}

impl DurationBuckets {
    fn add(&mut self, minutes: u64) {
        #[allow(clippy::cast_precision_loss)]
        let hours = minutes as f64 / 60.0;
        if hours < 5.0 {
            self.under_5h += 1;
        } else if hours <= 10.0 {
            self.from_5h_to_10h += 1;
        } else if hours <= 15.0 {
            self.from_11h_to_15h += 1;
        } else if hours <= 24.0 {
            self.from_16h_to_24h += 1;
        } else {
            self.over_24h += 1;
        }
    }
}

/// Total listening time in calendar units.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListeningTime {
    /// Days, one decimal.
    pub days: f64,
    /// Weeks, one decimal.
    pub weeks: f64,
    /// 30-day months, one decimal.
    pub months: f64,
    /// 365-day years, two decimals.
    pub years: f64,
}

/// Derived ratios.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    /// Records per distinct author.
    pub books_per_author: f64,
    /// Records per distinct narrator.
    pub books_per_narrator: f64,
    /// Distinct series relative to the record count, as a percentage.
    pub series_percentage: f64,
    /// Records per distinct series.
    pub avg_books_per_series: f64,
}

/// Statistics for a whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total_records: usize,
    pub total_minutes: u64,
    /// Whole hours in `total_minutes`.
    pub total_hours: u64,
    /// Mean length in whole minutes.
    pub average_minutes: u64,
    pub unique_authors: usize,
    pub unique_narrators: usize,
    pub unique_series: usize,
    pub unique_genres: usize,
    pub year_range: Option<YearRange>,
    pub top_authors: Vec<CountEntry>,
    pub top_narrators: Vec<CountEntry>,
    pub top_series: Vec<CountEntry>,
    pub top_genres: Vec<CountEntry>,
    pub top_years: Vec<CountEntry>,
    pub duration_buckets: DurationBuckets,
    pub listening: ListeningTime,
    pub insights: Insights,
}

/// Occurrence counter that remembers first-seen order.
#[derive(Default)]
struct Tally {
    positions: HashMap<String, usize>,
    entries: Vec<CountEntry>,
}

impl Tally {
    fn add(&mut self, value: Option<&str>) {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return;
        };
        if let Some(&position) = self.positions.get(value) {
            self.entries[position].count += 1;
        } else {
            self.positions.insert(value.to_string(), self.entries.len());
            self.entries.push(CountEntry {
                name: value.to_string(),
                count: 1,
            });
        }
    }

    fn distinct(&self) -> usize {
        self.entries.len()
    }

    fn keys(&self) -> HashSet<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Most common first; the stable sort keeps ties in first-seen order.
    fn top(&self, limit: usize) -> Vec<CountEntry> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);
        ranked
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[allow(clippy::cast_precision_loss)]
fn ratio_raw(numerator: usize, denominator: usize) -> f64 {
    numerator as f64 / denominator as f64
}

/// Quotient rounded to one decimal, zero when the denominator is zero.
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        round_to(ratio_raw(numerator, denominator), 1)
    }
}

/// Computes catalog statistics, keeping `top_limit` entries per top-N list.
#[tracing::instrument(skip(records), fields(records = records.len()))]
#[must_use]
pub fn catalog_stats(records: &[CanonicalRecord], top_limit: usize) -> CatalogStats {
    let mut authors = Tally::default();
    let mut narrators = Tally::default();
    let mut series = Tally::default();
    let mut genres = Tally::default();
    let mut years = Tally::default();
    let mut buckets = DurationBuckets::default();
    let mut total_minutes = 0_u64;

    for record in records {
        authors.add(record.author.as_deref());
        narrators.add(record.narrator.as_deref());
        series.add(record.series.as_deref());
        genres.add(record.genre.as_deref());
        years.add(record.year.as_deref());

        let minutes = duration_minutes(&record.duration);
        total_minutes = total_minutes.saturating_add(minutes);
        buckets.add(minutes);
    }

    let year_keys = years.keys();
    let year_range = match (year_keys.iter().min(), year_keys.iter().max()) {
        (Some(first), Some(last)) => Some(YearRange {
            first: (*first).to_string(),
            last: (*last).to_string(),
        }),
        _ => None,
    };

    let total_records = records.len();
    let total_hours = total_minutes / 60;
    #[allow(clippy::cast_precision_loss)]
    let days = total_hours as f64 / 24.0;

    CatalogStats {
        total_records,
        total_minutes,
        total_hours,
        average_minutes: total_minutes
            .checked_div(total_records as u64)
            .unwrap_or_default(),
        unique_authors: authors.distinct(),
        unique_narrators: narrators.distinct(),
        unique_series: series.distinct(),
        unique_genres: genres.distinct(),
        year_range,
        top_authors: authors.top(top_limit),
        top_narrators: narrators.top(top_limit),
        top_series: series.top(top_limit),
        top_genres: genres.top(top_limit),
        top_years: years.top(top_limit),
        duration_buckets: buckets,
        listening: ListeningTime {
            days: round_to(days, 1),
            weeks: round_to(days / 7.0, 1),
            months: round_to(days / 30.0, 1),
            years: round_to(days / 365.0, 2),
        },
        insights: Insights {
            books_per_author: ratio(total_records, authors.distinct()),
            books_per_narrator: ratio(total_records, narrators.distinct()),
            series_percentage: if total_records == 0 {
                0.0
            } else {
                round_to(ratio_raw(series.distinct(), total_records) * 100.0, 1)
            },
            avg_books_per_series: ratio(
                series.entries.iter().map(|e| e.count).sum(),
                series.distinct(),
            ),
        },
    }
}
