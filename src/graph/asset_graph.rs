// src/graph/asset_graph.rs

use std::collections::{HashMap, HashSet};

use crate::config::model::ConfigFile;
use crate::errors::{Result, SelectError};
use crate::graph::key::AssetKey;

/// Index of a node inside an [`AssetGraph`] arena.
pub type NodeId = usize;

/// One asset plus its immediate edges.
///
/// Edges are stored as arena indices; `deps` keeps declaration order and
/// `dependents` keeps the order in which dependents were declared.
#[derive(Debug, Clone)]
pub struct AssetNode {
    key: AssetKey,
    /// Direct upstream dependencies.
    deps: Vec<NodeId>,
    /// Direct downstream consumers (assets listing this one in `deps`).
    dependents: Vec<NodeId>,
    group: Option<String>,
    description: Option<String>,
}

impl AssetNode {
    pub fn key(&self) -> &AssetKey {
        &self.key
    }

    pub fn deps(&self) -> &[NodeId] {
        &self.deps
    }

    pub fn dependents(&self) -> &[NodeId] {
        &self.dependents
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Declaration of a single asset, as fed to [`AssetGraphBuilder`].
#[derive(Debug, Clone)]
pub struct AssetDefinition {
    pub key: AssetKey,
    pub deps: Vec<AssetKey>,
    pub group: Option<String>,
    pub description: Option<String>,
}

impl AssetDefinition {
    pub fn new(key: AssetKey, deps: Vec<AssetKey>) -> Self {
        Self {
            key,
            deps,
            group: None,
            description: None,
        }
    }
}

/// Immutable snapshot of the asset dependency graph.
///
/// Read-only once built, so a single snapshot can be shared across threads
/// and resolved against concurrently. Nodes are kept in declaration order,
/// which is also the order selections are reported in.
#[derive(Debug, Clone, Default)]
pub struct AssetGraph {
    nodes: Vec<AssetNode>,
    index: HashMap<AssetKey, NodeId>,
}

impl AssetGraph {
    pub fn builder() -> AssetGraphBuilder {
        AssetGraphBuilder::default()
    }

    /// Build the graph from a validated [`ConfigFile`].
    ///
    /// Assumes every dependency names a declared asset; validation already
    /// guarantees that.
    pub fn from_config(cfg: &ConfigFile) -> Self {
        let defs = cfg
            .assets()
            .iter()
            .map(|(key, asset)| AssetDefinition {
                key: key.clone(),
                deps: asset.deps.clone(),
                group: asset.group.clone(),
                description: asset.description.clone(),
            })
            .collect::<Vec<_>>();
        Self::assemble(defs)
    }

    /// Two passes: create nodes, then wire edges in both directions.
    /// Unknown deps are skipped and repeated deps are collapsed.
    fn assemble(defs: Vec<AssetDefinition>) -> Self {
        let mut index = HashMap::with_capacity(defs.len());
        let mut nodes = Vec::with_capacity(defs.len());
        let mut pending = Vec::with_capacity(defs.len());

        for def in defs {
            let id = nodes.len();
            index.insert(def.key.clone(), id);
            nodes.push(AssetNode {
                key: def.key,
                deps: Vec::new(),
                dependents: Vec::new(),
                group: def.group,
                description: def.description,
            });
            pending.push(def.deps);
        }

        for (id, deps) in pending.into_iter().enumerate() {
            for dep in deps {
                let Some(&dep_id) = index.get(&dep) else {
                    continue;
                };
                if nodes[id].deps.contains(&dep_id) {
                    continue;
                }
                nodes[id].deps.push(dep_id);
                nodes[dep_id].dependents.push(id);
            }
        }

        Self { nodes, index }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All asset keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &AssetKey> {
        self.nodes.iter().map(|n| &n.key)
    }

    /// All nodes in declaration order, paired with their ids.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &AssetNode)> {
        self.nodes.iter().enumerate()
    }

    pub fn contains(&self, key: &AssetKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn node_id(&self, key: &AssetKey) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    pub fn node(&self, key: &AssetKey) -> Option<&AssetNode> {
        self.node_id(key).map(|id| &self.nodes[id])
    }

    /// Node at `id`. Panics if the id did not come from this graph.
    pub fn node_at(&self, id: NodeId) -> &AssetNode {
        &self.nodes[id]
    }

    /// Immediate upstream dependencies of `key` (empty if unknown).
    pub fn upstream_of(&self, key: &AssetKey) -> Vec<&AssetKey> {
        self.node(key)
            .map(|n| n.deps.iter().map(|&id| &self.nodes[id].key).collect())
            .unwrap_or_default()
    }

    /// Immediate downstream dependents of `key` (empty if unknown).
    pub fn downstream_of(&self, key: &AssetKey) -> Vec<&AssetKey> {
        self.node(key)
            .map(|n| n.dependents.iter().map(|&id| &self.nodes[id].key).collect())
            .unwrap_or_default()
    }

    /// Assets with no upstream dependencies.
    pub fn roots(&self) -> impl Iterator<Item = &AssetKey> {
        self.nodes
            .iter()
            .filter(|n| n.deps.is_empty())
            .map(|n| &n.key)
    }

    /// Assets nothing depends on.
    pub fn leaves(&self) -> impl Iterator<Item = &AssetKey> {
        self.nodes
            .iter()
            .filter(|n| n.dependents.is_empty())
            .map(|n| &n.key)
    }
}

/// Incremental constructor for an [`AssetGraph`].
///
/// Cycles are accepted; only dangling and duplicate declarations are errors.
#[derive(Debug, Clone, Default)]
pub struct AssetGraphBuilder {
    defs: Vec<AssetDefinition>,
}

impl AssetGraphBuilder {
    /// Declare an asset and its upstream dependencies.
    pub fn asset<I>(mut self, key: AssetKey, deps: I) -> Self
    where
        I: IntoIterator<Item = AssetKey>,
    {
        self.defs
            .push(AssetDefinition::new(key, deps.into_iter().collect()));
        self
    }

    pub fn definition(mut self, def: AssetDefinition) -> Self {
        self.defs.push(def);
        self
    }

    pub fn build(self) -> Result<AssetGraph> {
        let mut seen = HashSet::with_capacity(self.defs.len());
        for def in &self.defs {
            if !seen.insert(&def.key) {
                return Err(SelectError::ConfigError(format!(
                    "asset '{}' is declared more than once",
                    def.key
                )));
            }
        }
        for def in &self.defs {
            for dep in &def.deps {
                if !seen.contains(dep) {
                    return Err(SelectError::AssetNotFound(format!(
                        "asset '{}' depends on unknown asset '{}'",
                        def.key, dep
                    )));
                }
            }
        }
        Ok(AssetGraph::assemble(self.defs))
    }
}
