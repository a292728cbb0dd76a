// src/selection/mod.rs

//! Asset selection language: parse clause text, then resolve it against an
//! [`AssetGraph`](crate::graph::AssetGraph).
//!
//! - [`parser`] turns clause text into a [`SelectionClause`].
//! - [`clause`] holds the parsed clause and query types.
//! - [`pattern`] implements `*` wildcard matching on joined keys.
//! - [`evaluator`] seeds and expands a single clause over the graph.
//! - [`resolver`] unions clauses and applies the unresolved-key policy.

pub mod clause;
pub mod evaluator;
pub mod parser;
pub mod pattern;
pub mod resolver;

pub use clause::{KeyPattern, SelectionClause, SelectionQuery, TraversalDepth, split_clauses};
pub use evaluator::{ClauseResolution, Direction, expand, resolve_clause};
pub use parser::{SelectionSyntaxError, SyntaxErrorKind, parse_clause};
pub use pattern::WildcardPattern;
pub use resolver::{AssetSelection, SelectionResolver, resolve_selection};
