use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// What to do when a literal key in a selection names no asset in the graph.
///
/// - `Strict`: any unresolved key fails the whole query (default; suits the
///   CLI and job definitions).
/// - `Lenient`: unresolved clauses contribute nothing and are reported
///   alongside the keys that did resolve (suits interactive search).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedKeyPolicy {
    #[default]
    Strict,
    Lenient,
}

impl FromStr for UnresolvedKeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(UnresolvedKeyPolicy::Strict),
            "lenient" => Ok(UnresolvedKeyPolicy::Lenient),
            other => Err(format!(
                "invalid unresolved_keys policy: {other} (expected \"strict\" or \"lenient\")"
            )),
        }
    }
}

/// How the CLI prints a resolved selection on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One joined asset key per line.
    #[default]
    Plain,
    /// A JSON object with `selected` and `unresolved` arrays.
    Json,
}
