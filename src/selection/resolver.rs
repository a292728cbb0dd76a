// src/selection/resolver.rs

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::{Result, SelectError};
use crate::graph::{AssetGraph, AssetKey};
use crate::selection::clause::SelectionQuery;
use crate::selection::evaluator::resolve_clause;
use crate::types::UnresolvedKeyPolicy;

/// Concrete outcome of resolving a [`SelectionQuery`].
///
/// Keys are listed in graph declaration order, so repeated resolution of the
/// same query against the same graph yields identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetSelection {
    #[serde(rename = "selected")]
    keys: Vec<AssetKey>,
    /// Literal keys that matched nothing (only non-empty in lenient mode).
    unresolved: Vec<AssetKey>,
}

impl AssetSelection {
    pub fn keys(&self) -> &[AssetKey] {
        &self.keys
    }

    pub fn unresolved(&self) -> &[AssetKey] {
        &self.unresolved
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &AssetKey) -> bool {
        self.keys.contains(key)
    }

    pub fn into_keys(self) -> Vec<AssetKey> {
        self.keys
    }
}

/// Resolves queries against one graph snapshot under one unresolved-key
/// policy. Holds no state between calls.
#[derive(Debug, Clone, Copy)]
pub struct SelectionResolver<'g> {
    graph: &'g AssetGraph,
    policy: UnresolvedKeyPolicy,
}

impl<'g> SelectionResolver<'g> {
    pub fn new(graph: &'g AssetGraph, policy: UnresolvedKeyPolicy) -> Self {
        Self { graph, policy }
    }

    pub fn policy(&self) -> UnresolvedKeyPolicy {
        self.policy
    }

    /// Union of every clause's selection.
    ///
    /// Under [`UnresolvedKeyPolicy::Strict`] any literal key missing from the
    /// graph fails the query with [`SelectError::UnresolvedKeys`]. Under
    /// `Lenient` those keys are reported on the returned selection instead.
    pub fn resolve(&self, query: &SelectionQuery) -> Result<AssetSelection> {
        let mut selected = BTreeSet::new();
        let mut unresolved: Vec<AssetKey> = Vec::new();

        for clause in query.clauses() {
            let resolution = resolve_clause(self.graph, clause);
            selected.extend(resolution.selected);
            if let Some(key) = resolution.unresolved {
                if !unresolved.contains(&key) {
                    unresolved.push(key);
                }
            }
        }

        if !unresolved.is_empty() {
            match self.policy {
                UnresolvedKeyPolicy::Strict => {
                    return Err(SelectError::UnresolvedKeys(unresolved));
                }
                UnresolvedKeyPolicy::Lenient => {
                    let names: Vec<String> = unresolved.iter().map(|k| k.to_string()).collect();
                    warn!(?names, "ignoring selection clauses with unknown asset keys");
                }
            }
        }

        let keys: Vec<AssetKey> = selected
            .into_iter()
            .map(|id| self.graph.node_at(id).key().clone())
            .collect();

        if keys.is_empty() {
            warn!(clauses = query.clauses().len(), "selection matched no assets");
        }
        info!(selected = keys.len(), "resolved asset selection");

        Ok(AssetSelection { keys, unresolved })
    }
}

/// Parse `clauses` and resolve them against `graph` in one step.
pub fn resolve_selection<I, S>(
    graph: &AssetGraph,
    clauses: I,
    policy: UnresolvedKeyPolicy,
) -> Result<AssetSelection>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let query = SelectionQuery::parse(clauses)?;
    SelectionResolver::new(graph, policy).resolve(&query)
}
