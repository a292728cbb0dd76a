// src/selection/clause.rs

use std::fmt;

use crate::graph::AssetKey;
use crate::selection::parser::{SelectionSyntaxError, parse_clause};
use crate::selection::pattern::WildcardPattern;

/// How far a clause expands in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalDepth {
    /// Exactly this many layers; `Layers(0)` means no traversal.
    Layers(usize),
    /// Full transitive closure (`*` marker).
    Unbounded,
}

impl TraversalDepth {
    pub const NONE: TraversalDepth = TraversalDepth::Layers(0);

    pub fn is_none(&self) -> bool {
        matches!(self, TraversalDepth::Layers(0))
    }

    /// Whether BFS layer `layer` (1-based) is still within this depth.
    pub fn allows(&self, layer: usize) -> bool {
        match self {
            TraversalDepth::Layers(n) => layer <= *n,
            TraversalDepth::Unbounded => true,
        }
    }
}

impl Default for TraversalDepth {
    fn default() -> Self {
        TraversalDepth::NONE
    }
}

/// What a clause's key part selects before any traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPattern {
    /// One exact key, which must exist in the graph.
    Literal(AssetKey),
    /// Every key whose joined text matches the wildcard.
    Wildcard(WildcardPattern),
}

/// One parsed selection expression, e.g. `++manhattan/manhattan_stats*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionClause {
    text: String,
    pattern: KeyPattern,
    upstream: TraversalDepth,
    downstream: TraversalDepth,
}

impl SelectionClause {
    pub fn new(
        text: impl Into<String>,
        pattern: KeyPattern,
        upstream: TraversalDepth,
        downstream: TraversalDepth,
    ) -> Self {
        Self {
            text: text.into(),
            pattern,
            upstream,
            downstream,
        }
    }

    /// Clause selecting exactly `key`, with no traversal.
    pub fn literal(key: AssetKey) -> Self {
        Self {
            text: key.to_string(),
            pattern: KeyPattern::Literal(key),
            upstream: TraversalDepth::NONE,
            downstream: TraversalDepth::NONE,
        }
    }

    pub fn parse(text: &str) -> Result<Self, SelectionSyntaxError> {
        parse_clause(text)
    }

    /// The clause as originally written.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pattern(&self) -> &KeyPattern {
        &self.pattern
    }

    pub fn upstream(&self) -> TraversalDepth {
        self.upstream
    }

    pub fn downstream(&self) -> TraversalDepth {
        self.downstream
    }
}

impl fmt::Display for SelectionClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Ordered list of clauses; resolves to the union of their selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionQuery {
    clauses: Vec<SelectionClause>,
}

impl SelectionQuery {
    pub fn new(clauses: Vec<SelectionClause>) -> Self {
        Self { clauses }
    }

    /// Parse already-split clause strings. The first bad clause rejects the
    /// whole query.
    pub fn parse<I, S>(clauses: I) -> Result<Self, SelectionSyntaxError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let clauses = clauses
            .into_iter()
            .map(|c| parse_clause(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { clauses })
    }

    /// Split free-form input (see [`split_clauses`]) and parse every clause.
    pub fn from_text(text: &str) -> Result<Self, SelectionSyntaxError> {
        Self::parse(split_clauses(text))
    }

    pub fn clauses(&self) -> &[SelectionClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Split user input into clause strings on commas and whitespace.
///
/// A comma-delimited segment with nothing in it (`"a,,b"`, `"a,"`) yields an
/// empty clause so the parser rejects it. Blank input yields no clauses.
pub fn split_clauses(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    for segment in text.split(',') {
        let before = out.len();
        out.extend(segment.split_whitespace());
        if out.len() == before {
            out.push(segment.trim());
        }
    }
    out
}
