//! CLI entry point for the bookshelf tool.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod app_config;
mod cli;
mod commands;
mod output;

use app_config::Settings;
use cli::{Cli, Command, ConfigCommand};

fn no_color_env_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color_env_requested())
        .with_env_filter(filter)
        .try_init();
}

fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    let loaded_config = app_config::load_config(cli.config.as_deref())?;
    let settings = Settings::from_sources(&cli, loaded_config.config.as_ref());

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config file > default (info)
    init_tracing(settings.verbosity.log_level());
    debug!(?cli, "CLI arguments parsed");

    let Some(command) = &cli.command else {
        output::print_quick_start_guidance();
        return Ok(());
    };

    match command {
        Command::Resolve { snapshot } => commands::run_resolve_command(snapshot, &settings),
        Command::Series { records } => commands::run_series_command(records, &settings),
        Command::Stats { records, top } => commands::run_stats_command(records, *top, &settings),
        Command::Diff {
            previous,
            current,
            limit,
        } => commands::run_diff_command(previous, current, *limit, &settings),
        Command::ParseTitle { title } => commands::run_parse_title_command(title, &settings),
        Command::Config {
            command: ConfigCommand::Show,
        } => commands::run_config_show_command(&loaded_config, &settings),
    }
}
