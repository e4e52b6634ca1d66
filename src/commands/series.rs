//! Series command handler: gap and completion report.

use std::path::Path;

use anyhow::Result;
use bookshelf_core::series::analyze_series;

use crate::app_config::Settings;
use crate::cli::OutputFormat;
use crate::output;

pub fn run_series_command(records_path: &Path, settings: &Settings) -> Result<()> {
    let records = super::read_records(records_path)?;
    let analysis = analyze_series(&records);

    match settings.output_format {
        OutputFormat::Json => output::print_json(&analysis)?,
        OutputFormat::Text => output::print_lines(&output::render_series_lines(&analysis)),
    }

    Ok(())
}
