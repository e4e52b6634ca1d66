//! Parse-title command handler: show the title parser's verdict.

use anyhow::Result;
use bookshelf_core::title::TitleParser;

use crate::app_config::Settings;
use crate::cli::OutputFormat;
use crate::output;

pub fn run_parse_title_command(title: &str, settings: &Settings) -> Result<()> {
    let verdict = TitleParser::new().parse(title);

    match settings.output_format {
        OutputFormat::Json => output::print_json(&output::verdict_json(&verdict))?,
        OutputFormat::Text => output::print_lines(&output::render_verdict_lines(&verdict)),
    }

    Ok(())
}
