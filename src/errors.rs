// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::graph::AssetKey;
use crate::selection::SelectionSyntaxError;

#[derive(Error, Debug)]
pub enum SelectError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Cycle detected in asset graph: {0}")]
    DagCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Syntax(#[from] SelectionSyntaxError),

    #[error("Unresolved asset keys: {}", join_keys(.0))]
    UnresolvedKeys(Vec<AssetKey>),
}

fn join_keys(keys: &[AssetKey]) -> String {
    keys.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, SelectError>;
