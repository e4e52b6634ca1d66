//! Stats command handler: collection-wide statistics.

use std::path::Path;

use anyhow::Result;
use bookshelf_core::stats::catalog_stats;

use crate::app_config::Settings;
use crate::cli::OutputFormat;
use crate::output;

pub fn run_stats_command(records_path: &Path, top: Option<u8>, settings: &Settings) -> Result<()> {
    let records = super::read_records(records_path)?;
    let top_limit = top.map_or(settings.top_limit, usize::from);
    let stats = catalog_stats(&records, top_limit);

    match settings.output_format {
        OutputFormat::Json => output::print_json(&stats)?,
        OutputFormat::Text => output::print_lines(&output::render_stats_lines(&stats)),
    }

    Ok(())
}
