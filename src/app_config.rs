//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bookshelf_core::changes::DEFAULT_NEW_ITEMS_LIMIT;
use bookshelf_core::stats::DEFAULT_TOP_LIMIT;
use bookshelf_core::tags::FreeformHints;

use crate::cli::{Cli, OutputFormat};

/// Key-value file configuration for bookshelf defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
    /// Default report format.
    pub output_format: Option<OutputFormat>,
    /// Free-form suffix hints for the series name (replace the built-ins).
    pub series_hints: Option<Vec<String>>,
    /// Free-form suffix hints for the series index (replace the built-ins).
    pub index_hints: Option<Vec<String>>,
    /// Entries per top-N list in `stats` (1..=50).
    pub top_limit: Option<u8>,
    /// New records listed by `diff` (1..=100).
    pub new_items_limit: Option<u8>,
}

impl FileConfig {
    /// Validates config values against CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(top_limit) = self.top_limit
            && !(1..=50).contains(&top_limit)
        {
            bail!("Invalid config value for `top_limit`: {top_limit}. Expected range: 1..=50");
        }

        if let Some(limit) = self.new_items_limit
            && !(1..=100).contains(&limit)
        {
            bail!("Invalid config value for `new_items_limit`: {limit}. Expected range: 1..=100");
        }

        Ok(())
    }
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerbositySetting {
    #[default]
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Verbose => "verbose",
            Self::Quiet => "quiet",
            Self::Debug => "debug",
        }
    }

    /// Tracing filter level for this mode.
    #[must_use]
    pub fn log_level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
    /// Indicates whether configuration was loaded from disk.
    pub loaded_from_file: bool,
}

/// Settings after merging CLI flags over the config file over built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub verbosity: VerbositySetting,
    pub output_format: OutputFormat,
    pub hints: FreeformHints,
    pub top_limit: usize,
    pub new_items_limit: usize,
}

impl Settings {
    /// Priority: CLI flag > config file > default.
    #[must_use]
    pub fn from_sources(cli: &Cli, config: Option<&FileConfig>) -> Self {
        let file = config.cloned().unwrap_or_default();

        let verbosity = if cli.quiet {
            VerbositySetting::Quiet
        } else {
            match cli.verbose {
                0 => file.verbosity.unwrap_or_default(),
                1 => VerbositySetting::Verbose,
                _ => VerbositySetting::Debug,
            }
        };

        let defaults = FreeformHints::default();
        let hints = FreeformHints {
            series: file.series_hints.unwrap_or(defaults.series),
            index: file.index_hints.unwrap_or(defaults.index),
        };

        Self {
            verbosity,
            output_format: cli
                .format
                .or(file.output_format)
                .unwrap_or_default(),
            hints,
            top_limit: file.top_limit.map_or(DEFAULT_TOP_LIMIT, usize::from),
            new_items_limit: file
                .new_items_limit
                .map_or(DEFAULT_NEW_ITEMS_LIMIT, usize::from),
        }
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/bookshelf/config.toml`
/// 2. `$HOME/.config/bookshelf/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("bookshelf")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("bookshelf")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from `explicit` if given, else from the default path if present.
///
/// An explicit path that does not exist is an error; a missing default file
/// means built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_file_config(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config: Some(config),
            loaded_from_file: true,
        });
    }

    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
        loaded_from_file: true,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "verbosity" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `verbosity` value on line {}", line_index + 1)
                })?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!(
                        "Invalid `verbosity` value '{}' on line {}",
                        parsed,
                        line_index + 1
                    )
                })?);
            }
            "output_format" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `output_format` value on line {}", line_index + 1)
                })?;
                cfg.output_format = Some(parse_output_format(&parsed).with_context(|| {
                    format!(
                        "Invalid `output_format` value '{}' on line {}",
                        parsed,
                        line_index + 1
                    )
                })?);
            }
            "series_hints" => {
                let parsed = parse_hint_list(value).with_context(|| {
                    format!("Invalid `series_hints` value on line {}", line_index + 1)
                })?;
                cfg.series_hints = Some(parsed);
            }
            "index_hints" => {
                let parsed = parse_hint_list(value).with_context(|| {
                    format!("Invalid `index_hints` value on line {}", line_index + 1)
                })?;
                cfg.index_hints = Some(parsed);
            }
            "top_limit" => {
                let parsed = parse_integer_u8(value).with_context(|| {
                    format!("Invalid `top_limit` value on line {}", line_index + 1)
                })?;
                cfg.top_limit = Some(parsed);
            }
            "new_items_limit" => {
                let parsed = parse_integer_u8(value).with_context(|| {
                    format!("Invalid `new_items_limit` value on line {}", line_index + 1)
                })?;
                cfg.new_items_limit = Some(parsed);
            }
            unknown => {
                bail!(
                    "Unknown configuration key: '{}' on line {}",
                    unknown,
                    line_index + 1
                );
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

/// Quoted, comma-separated list: `"series, book series"`.
fn parse_hint_list(raw_value: &str) -> Result<Vec<String>> {
    let parsed = parse_string_literal(raw_value)?;
    let hints: Vec<String> = parsed
        .split(',')
        .map(|hint| hint.trim().to_lowercase())
        .filter(|hint| !hint.is_empty())
        .collect();
    if hints.is_empty() {
        bail!("Expected at least one hint");
    }
    Ok(hints)
}

fn parse_integer_u8(raw_value: &str) -> Result<u8> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<u16>()?;
    u8::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u8"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}

fn parse_output_format(value: &str) -> Result<OutputFormat> {
    match value {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => bail!("Expected one of: text, json"),
    }
}
