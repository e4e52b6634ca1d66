//! New-item detection between two resolved catalogs.

use std::collections::HashSet;

use serde::Serialize;
use tracing::info;

use crate::metadata::CanonicalRecord;

/// Default number of new records listed in a report.
pub const DEFAULT_NEW_ITEMS_LIMIT: usize = 10;

/// Records present in the current catalog but not the previous one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewItemsReport {
    /// How many records are new.
    pub new_count: usize,
    /// Size of the current catalog.
    pub total_count: usize,
    /// The first new records, in current-catalog order.
    pub records: Vec<CanonicalRecord>,
}

/// Identity of a record across catalog runs.
fn record_identity(record: &CanonicalRecord) -> String {
    format!(
        "{}|{}",
        record.title,
        record.author.as_deref().unwrap_or_default()
    )
}

/// Finds records of `current` whose `title|author` identity is absent from `previous`.
///
/// At most `limit` records are listed; `new_count` counts all of them.
#[tracing::instrument(skip(previous, current), fields(previous = previous.len(), current = current.len()))]
#[must_use]
pub fn detect_new_records(
    previous: &[CanonicalRecord],
    current: &[CanonicalRecord],
    limit: usize,
) -> NewItemsReport {
    let known: HashSet<String> = previous.iter().map(record_identity).collect();
    let new_records: Vec<&CanonicalRecord> = current
        .iter()
        .filter(|record| !known.contains(&record_identity(record)))
        .collect();

    info!(new = new_records.len(), "New records detected");

    NewItemsReport {
        new_count: new_records.len(),
        total_count: current.len(),
        records: new_records.into_iter().take(limit).cloned().collect(),
    }
}
