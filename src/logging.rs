// src/logging.rs

//! Logging setup for `assetsel` using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. the `--log-level` CLI flag, applied to every target;
//! 2. the `ASSETSEL_LOG` environment variable, read as `EnvFilter`
//!    directives (`debug`, `assetsel::selection=trace,info`);
//! 3. `info`.
//!
//! An `ASSETSEL_LOG` value that does not parse is ignored. Logs go to
//! STDERR; stdout carries only the selected keys.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "ASSETSEL_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let filter = EnvFilter::try_new(filter_directives(cli_level, env_value.as_deref()))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}

/// Filter directives for the given CLI level and `ASSETSEL_LOG` value.
pub fn filter_directives(cli_level: Option<LogLevel>, env_value: Option<&str>) -> String {
    if let Some(lvl) = cli_level {
        return level_directive(lvl).to_string();
    }

    match env_value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) if EnvFilter::try_new(directives).is_ok() => directives.to_string(),
        _ => DEFAULT_DIRECTIVES.to_string(),
    }
}

fn level_directive(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
