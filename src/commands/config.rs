//! Config command handlers: show effective configuration.

use anyhow::Result;

use crate::app_config::{LoadedConfig, Settings};

pub fn run_config_show_command(loaded_config: &LoadedConfig, settings: &Settings) -> Result<()> {
    let resolved_path = loaded_config.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded_config.loaded_from_file {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!("verbosity = {}", settings.verbosity.as_str());
    println!("output_format = {}", settings.output_format.as_str());
    println!("series_hints = {}", settings.hints.series.join(", "));
    println!("index_hints = {}", settings.hints.index.join(", "));
    println!("top_limit = {}", settings.top_limit);
    println!("new_items_limit = {}", settings.new_items_limit);

    Ok(())
}
