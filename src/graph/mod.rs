// src/graph/mod.rs

//! Asset dependency graph.
//!
//! - [`key`] holds the hierarchical [`AssetKey`] identifier.
//! - [`asset_graph`] holds the read-only arena the selection resolver walks.

pub mod asset_graph;
pub mod key;

pub use asset_graph::{AssetDefinition, AssetGraph, AssetGraphBuilder, AssetNode, NodeId};
pub use key::{AssetKey, InvalidAssetKey};
