//! Resolve command handler: tag snapshot to canonical records.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bookshelf_core::metadata::{MetadataResolver, load_catalog_snapshot, resolve_catalog};
use tracing::info;

use crate::app_config::Settings;
use crate::cli::OutputFormat;
use crate::output;

pub fn run_resolve_command(snapshot: &Path, settings: &Settings) -> Result<()> {
    let raw = fs::read_to_string(snapshot)
        .with_context(|| format!("Failed to read snapshot '{}'", snapshot.display()))?;
    let items = load_catalog_snapshot(&raw)
        .with_context(|| format!("Failed to load snapshot '{}'", snapshot.display()))?;
    info!(items = items.len(), "Snapshot loaded");

    let resolver = MetadataResolver::new().with_hints(settings.hints.clone());
    let resolution = resolve_catalog(&resolver, items);

    match settings.output_format {
        OutputFormat::Json => output::print_json(&resolution.records)?,
        OutputFormat::Text => output::print_lines(&output::render_resolution_lines(&resolution)),
    }

    Ok(())
}
