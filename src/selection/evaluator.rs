// src/selection/evaluator.rs

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, trace};

use crate::graph::{AssetGraph, AssetKey, NodeId};
use crate::selection::clause::{KeyPattern, SelectionClause, TraversalDepth};

/// Which edges a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Asset -> its declared dependencies.
    Upstream,
    /// Asset -> assets that declare it as a dependency.
    Downstream,
}

/// Result of evaluating one clause against a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseResolution {
    /// Selected node ids; ordered by declaration in the graph.
    pub selected: BTreeSet<NodeId>,
    /// Set when the clause names a literal key the graph does not contain.
    pub unresolved: Option<AssetKey>,
}

/// Evaluate a clause: seed nodes, then upstream and downstream expansion.
pub fn resolve_clause(graph: &AssetGraph, clause: &SelectionClause) -> ClauseResolution {
    let seeds: Vec<NodeId> = match clause.pattern() {
        KeyPattern::Literal(key) => match graph.node_id(key) {
            Some(id) => vec![id],
            None => {
                debug!(clause = %clause, key = %key, "asset key not found in graph");
                return ClauseResolution {
                    selected: BTreeSet::new(),
                    unresolved: Some(key.clone()),
                };
            }
        },
        KeyPattern::Wildcard(pattern) => graph
            .nodes()
            .filter(|(_, node)| pattern.is_match(node.key()))
            .map(|(id, _)| id)
            .collect(),
    };

    let mut selected: BTreeSet<NodeId> = seeds.iter().copied().collect();
    selected.extend(expand(graph, &seeds, clause.upstream(), Direction::Upstream));
    selected.extend(expand(graph, &seeds, clause.downstream(), Direction::Downstream));

    debug!(
        clause = %clause,
        seeds = seeds.len(),
        selected = selected.len(),
        "resolved selection clause"
    );

    ClauseResolution {
        selected,
        unresolved: None,
    }
}

/// Breadth-first expansion from `seeds`, layer by layer.
///
/// Seeds are layer 0 and are not part of the returned list. Each node is
/// visited at most once, so cycles and diamonds terminate. Neighbours are
/// visited in edge declaration order, which makes the returned order stable.
pub fn expand(
    graph: &AssetGraph,
    seeds: &[NodeId],
    depth: TraversalDepth,
    direction: Direction,
) -> Vec<NodeId> {
    let mut discovered = Vec::new();
    if depth.is_none() {
        return discovered;
    }

    let mut visited: HashSet<NodeId> = seeds.iter().copied().collect();
    let mut frontier: Vec<NodeId> = seeds.to_vec();
    let mut layer = 1;

    while !frontier.is_empty() && depth.allows(layer) {
        let mut next = Vec::new();
        for &id in &frontier {
            let node = graph.node_at(id);
            let neighbours = match direction {
                Direction::Upstream => node.deps(),
                Direction::Downstream => node.dependents(),
            };
            for &n in neighbours {
                if visited.insert(n) {
                    next.push(n);
                }
            }
        }

        trace!(?direction, layer, added = next.len(), "expanded traversal layer");
        discovered.extend_from_slice(&next);
        frontier = next;
        layer += 1;
    }

    discovered
}
