//! Diff command handler: records added since a previous catalog.

use std::path::Path;

use anyhow::Result;
use bookshelf_core::changes::detect_new_records;

use crate::app_config::Settings;
use crate::cli::OutputFormat;
use crate::output;

pub fn run_diff_command(
    previous_path: &Path,
    current_path: &Path,
    limit: Option<u8>,
    settings: &Settings,
) -> Result<()> {
    let previous = super::read_records(previous_path)?;
    let current = super::read_records(current_path)?;
    let limit = limit.map_or(settings.new_items_limit, usize::from);
    let report = detect_new_records(&previous, &current, limit);

    match settings.output_format {
        OutputFormat::Json => output::print_json(&report)?,
        OutputFormat::Text => output::print_lines(&output::render_new_items_lines(&report)),
    }

    Ok(())
}
