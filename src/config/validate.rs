// src/config/validate.rs

use std::collections::BTreeMap;
use std::sync::LazyLock;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use regex::Regex;

use crate::config::model::{AssetConfig, ConfigFile, RawConfigFile};
use crate::errors::{Result, SelectError};
use crate::graph::AssetKey;

/// Allowed characters in a key component. Keeps `*`, `+`, `,` and
/// whitespace out of keys so the selection grammar stays unambiguous.
static KEY_COMPONENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-.]+$").expect("static regex is valid"));

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = SelectError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let assets = validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, assets))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<BTreeMap<AssetKey, AssetConfig>> {
    ensure_has_assets(cfg)?;
    let assets = parse_assets(cfg)?;
    validate_dependencies(&assets)?;
    validate_dag(&assets)?;
    Ok(assets)
}

fn ensure_has_assets(cfg: &RawConfigFile) -> Result<()> {
    if cfg.asset.is_empty() {
        return Err(SelectError::ConfigError(
            "config must contain at least one [asset.<key>] section".to_string(),
        ));
    }
    Ok(())
}

fn parse_key(text: &str, context: &str) -> Result<AssetKey> {
    let key = AssetKey::parse(text)
        .map_err(|e| SelectError::ConfigError(format!("{context}: {e}")))?;

    if let Some(bad) = key.path().iter().find(|c| !KEY_COMPONENT.is_match(c)) {
        return Err(SelectError::ConfigError(format!(
            "{context}: invalid key component '{bad}' in '{text}' \
             (allowed: letters, digits, '_', '-', '.')"
        )));
    }
    Ok(key)
}

fn parse_assets(cfg: &RawConfigFile) -> Result<BTreeMap<AssetKey, AssetConfig>> {
    let mut assets = BTreeMap::new();

    for (name, asset) in cfg.asset.iter() {
        let key = parse_key(name, "asset key")?;
        let deps = asset
            .deps
            .iter()
            .map(|dep| parse_key(dep, &format!("dependency of asset '{name}'")))
            .collect::<Result<Vec<_>>>()?;

        assets.insert(
            key,
            AssetConfig {
                deps,
                group: asset.group.clone(),
                description: asset.description.clone(),
            },
        );
    }

    Ok(assets)
}

fn validate_dependencies(assets: &BTreeMap<AssetKey, AssetConfig>) -> Result<()> {
    for (key, asset) in assets.iter() {
        for dep in asset.deps.iter() {
            if dep == key {
                return Err(SelectError::ConfigError(format!(
                    "asset '{}' cannot depend on itself in `deps`",
                    key
                )));
            }
            if !assets.contains_key(dep) {
                return Err(SelectError::ConfigError(format!(
                    "asset '{}' has unknown dependency '{}' in `deps`",
                    key, dep
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(assets: &BTreeMap<AssetKey, AssetConfig>) -> Result<()> {
    // Edge direction: dep -> asset.
    let mut graph: DiGraphMap<&AssetKey, ()> = DiGraphMap::new();

    for key in assets.keys() {
        graph.add_node(key);
    }

    for (key, asset) in assets.iter() {
        for dep in asset.deps.iter() {
            graph.add_edge(dep, key, ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(SelectError::DagCycle(format!(
            "cycle detected in asset graph involving asset '{}'",
            cycle.node_id()
        ))),
    }
}
