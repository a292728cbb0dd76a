// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::{OutputFormat, UnresolvedKeyPolicy};

/// Command-line arguments for `assetsel`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "assetsel",
    version,
    about = "Resolve asset selection queries against an asset dependency graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Selection clauses, e.g. `*manhattan_map` or `taxi_zones_file++`.
    ///
    /// Each argument may hold several clauses separated by commas or
    /// whitespace; the result is the union of all clauses.
    #[arg(value_name = "SELECTION", required = true)]
    pub selection: Vec<String>,

    /// Path to the asset definitions file (TOML).
    ///
    /// Default: `$ASSETSEL_CONFIG`, else `Assets.toml` in the current
    /// working directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What to do when a clause names an asset that does not exist.
    ///
    /// Overrides `[config].unresolved_keys`.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub unresolved: Option<UnresolvedKeyPolicy>,

    /// Output format for the selected keys.
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ASSETSEL_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate definitions and parse the selection, print both, but don't
    /// resolve anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
