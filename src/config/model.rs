// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::graph::AssetKey;
use crate::types::UnresolvedKeyPolicy;

/// Asset definitions file as read from TOML, before validation.
///
/// ```toml
/// [config]
/// unresolved_keys = "strict"
///
/// [asset.taxi_zones_file]
/// description = "Raw taxi zone shapefile"
///
/// [asset.taxi_zones]
/// deps = ["taxi_zones_file"]
///
/// [asset."manhattan/manhattan_stats"]
/// deps = ["taxi_zones"]
/// group = "manhattan"
/// ```
///
/// Keys of the `asset` table are `/`-joined asset keys.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub asset: BTreeMap<String, RawAssetConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigSection {
    /// `"strict"` (default) or `"lenient"`; see [`UnresolvedKeyPolicy`].
    #[serde(default)]
    pub unresolved_keys: UnresolvedKeyPolicy,
}

/// `[asset.<key>]` section as written.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawAssetConfig {
    /// Upstream dependencies, as `/`-joined keys.
    #[serde(default)]
    pub deps: Vec<String>,

    #[serde(default)]
    pub group: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// A validated asset definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    pub deps: Vec<AssetKey>,
    pub group: Option<String>,
    pub description: Option<String>,
}

/// Validated definitions file. Only obtainable through
/// `ConfigFile::try_from(RawConfigFile)` or the loader.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    config: ConfigSection,
    assets: BTreeMap<AssetKey, AssetConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        assets: BTreeMap<AssetKey, AssetConfig>,
    ) -> Self {
        Self { config, assets }
    }

    pub fn config_section(&self) -> &ConfigSection {
        &self.config
    }

    pub fn assets(&self) -> &BTreeMap<AssetKey, AssetConfig> {
        &self.assets
    }

    pub fn unresolved_keys(&self) -> UnresolvedKeyPolicy {
        self.config.unresolved_keys
    }
}
