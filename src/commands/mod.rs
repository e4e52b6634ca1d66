//! CLI command handlers.

mod config;
mod diff;
mod parse_title;
mod resolve;
mod series;
mod stats;

pub use config::run_config_show_command;
pub use diff::run_diff_command;
pub use parse_title::run_parse_title_command;
pub use resolve::run_resolve_command;
pub use series::run_series_command;
pub use stats::run_stats_command;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bookshelf_core::metadata::CanonicalRecord;

/// Reads a JSON array of resolved records.
fn read_records(path: &Path) -> Result<Vec<CanonicalRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file '{}'", path.display()))?;
    serde_json::from_str(&raw).with_context(|| {
        format!(
            "Failed to parse records file '{}': expected a JSON array of records (the output of `bookshelf resolve --format json`)",
            path.display()
        )
    })
}
