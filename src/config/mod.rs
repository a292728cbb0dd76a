// src/config/mod.rs

//! Asset definitions file for the CLI.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a definitions file from disk (`loader.rs`).
//! - Validate keys and graph structure (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{CONFIG_ENV_VAR, default_config_path, load_and_validate, load_from_path};
pub use model::{AssetConfig, ConfigFile, ConfigSection, RawAssetConfig, RawConfigFile};
