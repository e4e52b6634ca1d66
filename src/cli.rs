//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Resolve and audit audiobook catalog metadata.
///
/// Bookshelf turns raw tag snapshots into canonical records with series,
/// index, and contributor fields, then reports on series gaps, collection
/// statistics, and newly added items.
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (defaults to the config file setting, then text)
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Report format on stdout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Stable label, matching the config file value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve every item of a tag-reader snapshot into canonical records
    Resolve {
        /// JSON snapshot written by the tag reader
        snapshot: PathBuf,
    },

    /// Group resolved records by series and report gaps and completion
    Series {
        /// JSON array of resolved records
        records: PathBuf,
    },

    /// Collection statistics over resolved records
    Stats {
        /// JSON array of resolved records
        records: PathBuf,

        /// Entries per top-N list (1-50)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=50))]
        top: Option<u8>,
    },

    /// List records added since a previous catalog
    Diff {
        /// Earlier JSON array of resolved records
        previous: PathBuf,

        /// Current JSON array of resolved records
        current: PathBuf,

        /// Maximum new records to list (1-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
        limit: Option<u8>,
    },

    /// Show how a single title is parsed for series and index
    ParseTitle {
        /// Title text
        title: String,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
}
