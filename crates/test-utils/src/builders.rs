#![allow(dead_code)]

use assetsel::config::{ConfigFile, RawAssetConfig, RawConfigFile};
use assetsel::errors::SelectError;
use assetsel::graph::{AssetGraph, AssetKey};
use assetsel::types::UnresolvedKeyPolicy;

/// Parse a `/`-joined key, panicking on malformed test input.
pub fn key(text: &str) -> AssetKey {
    AssetKey::parse(text).expect("test asset key must be well-formed")
}

/// Parse several keys, keeping their order.
pub fn keys(texts: &[&str]) -> Vec<AssetKey> {
    texts.iter().map(|t| key(t)).collect()
}

/// Build a graph from `(asset, deps)` pairs, declared in the given order.
///
/// Goes through `AssetGraphBuilder`, so cycles are allowed.
pub fn graph_from_edges(edges: &[(&str, &[&str])]) -> AssetGraph {
    edges
        .iter()
        .fold(AssetGraph::builder(), |builder, (asset, deps)| {
            builder.asset(key(asset), deps.iter().map(|d| key(d)))
        })
        .build()
        .expect("test graph must only reference declared assets")
}

/// The NYC taxi tutorial graph:
///
/// ```text
/// taxi_zones_file -> taxi_zones -> manhattan/manhattan_stats -> manhattan_map
/// taxi_trips_file
/// ```
pub fn taxi_graph() -> AssetGraph {
    graph_from_edges(&[
        ("taxi_zones_file", &[]),
        ("taxi_zones", &["taxi_zones_file"]),
        ("manhattan/manhattan_stats", &["taxi_zones"]),
        ("manhattan_map", &["manhattan/manhattan_stats"]),
        ("taxi_trips_file", &[]),
    ])
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_asset(mut self, key: &str, asset: RawAssetConfig) -> Self {
        self.config.asset.insert(key.to_string(), asset);
        self
    }

    pub fn with_unresolved_keys(mut self, policy: UnresolvedKeyPolicy) -> Self {
        self.config.config.unresolved_keys = policy;
        self
    }

    pub fn try_build(self) -> Result<ConfigFile, SelectError> {
        ConfigFile::try_from(self.config)
    }

    pub fn build(self) -> ConfigFile {
        self.try_build()
            .expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RawAssetConfig`.
pub struct AssetConfigBuilder {
    asset: RawAssetConfig,
}

impl AssetConfigBuilder {
    pub fn new() -> Self {
        Self {
            asset: RawAssetConfig::default(),
        }
    }

    pub fn dep(mut self, dep: &str) -> Self {
        self.asset.deps.push(dep.to_string());
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.asset.group = Some(group.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.asset.description = Some(description.to_string());
        self
    }

    pub fn build(self) -> RawAssetConfig {
        self.asset
    }
}

impl Default for AssetConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
