// src/selection/parser.rs

//! Clause grammar:
//!
//! ```text
//! clause            := upstream_marker? key_pattern downstream_marker?
//! upstream_marker   := '*' | '+'+
//! downstream_marker := '*' | '+'+
//! key_pattern       := component ('/' component)*
//! ```
//!
//! A `*` is either a traversal marker or a wildcard inside the key text.
//! After stripping one leading and one trailing `*`:
//!
//! - any `*` left inside the text makes the whole clause a wildcard match
//!   (`*ke*y*`, `taxi_*_file`) with no traversal;
//! - a clause wrapped in stars on both ends is a wildcard match when the
//!   inner text is a single component (`*taxi_zones*` selects every key
//!   containing `taxi_zones`), and full lineage when it has a `/`
//!   (`*manhattan/manhattan_stats*`);
//! - otherwise leading/trailing `*` and `+` runs are traversal markers and
//!   the remaining text is a literal key.
//!
//! Empty path components (`a//b`, `/a`, `a/`) are rejected in both literal
//! keys and wildcards.

use thiserror::Error;
use tracing::debug;

use crate::graph::AssetKey;
use crate::selection::clause::{KeyPattern, SelectionClause, TraversalDepth};
use crate::selection::pattern::WildcardPattern;

/// Why a clause was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("clause is empty")]
    EmptyClause,

    #[error("no asset key between the traversal markers")]
    EmptyKey,

    #[error("empty key component")]
    EmptyComponent,

    #[error("`*` and `+` cannot be mixed at the same end of a clause")]
    MixedMarkers,

    #[error("`{0}` is only allowed at the start or end of a clause")]
    UnexpectedMarker(char),

    #[error("`+` traversal cannot be combined with a wildcard pattern")]
    MarkersOnWildcard,

    #[error("unexpected whitespace")]
    UnexpectedWhitespace,

    #[error("invalid wildcard pattern: {0}")]
    InvalidPattern(String),
}

/// A clause that does not follow the selection grammar.
///
/// `offset` is the character offset (not byte offset) of the problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selection `{clause}` at offset {offset}: {kind}")]
pub struct SelectionSyntaxError {
    pub clause: String,
    pub offset: usize,
    pub kind: SyntaxErrorKind,
}

fn is_marker(c: char) -> bool {
    c == '*' || c == '+'
}

/// Parse a single clause.
pub fn parse_clause(text: &str) -> Result<SelectionClause, SelectionSyntaxError> {
    let err = |offset: usize, kind: SyntaxErrorKind| SelectionSyntaxError {
        clause: text.to_string(),
        offset,
        kind,
    };

    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    if len == 0 {
        return Err(err(0, SyntaxErrorKind::EmptyClause));
    }
    if let Some(pos) = chars.iter().position(|c| c.is_whitespace()) {
        return Err(err(pos, SyntaxErrorKind::UnexpectedWhitespace));
    }

    let lead = chars.iter().take_while(|&&c| is_marker(c)).count();
    if let Some(pos) = mixed_at(&chars[..lead]) {
        return Err(err(pos, SyntaxErrorKind::MixedMarkers));
    }
    if lead == len {
        return Err(err(len, SyntaxErrorKind::EmptyKey));
    }

    let trail = chars.iter().rev().take_while(|&&c| is_marker(c)).count();
    let trail_start = len - trail;
    if let Some(pos) = mixed_at(&chars[trail_start..]) {
        return Err(err(trail_start + pos, SyntaxErrorKind::MixedMarkers));
    }

    // At least one non-marker char exists, so `inner` is never inverted.
    let starred_front = chars[0] == '*';
    let starred_back = chars[len - 1] == '*';
    let inner = &chars[usize::from(starred_front)..len - usize::from(starred_back)];

    let embedded_star = inner.contains(&'*');
    let wrapped = starred_front && starred_back && !inner.contains(&'/');

    let clause = if embedded_star || wrapped {
        parse_wildcard(text, &chars).map_err(|(offset, kind)| err(offset, kind))?
    } else {
        parse_traversal(text, &chars, lead, trail_start)
            .map_err(|(offset, kind)| err(offset, kind))?
    };

    debug!(
        clause = %text,
        pattern = ?clause.pattern(),
        upstream = ?clause.upstream(),
        downstream = ?clause.downstream(),
        "parsed selection clause"
    );

    Ok(clause)
}

/// Offset (within `run`) of the first marker that differs from the first one.
fn mixed_at(run: &[char]) -> Option<usize> {
    let first = *run.first()?;
    run.iter().position(|&c| c != first)
}

/// Offset of the first empty `/`-separated component, if any.
fn empty_component_at(chars: &[char]) -> Option<usize> {
    let mut start = 0;
    for part in chars.split(|&c| c == '/') {
        if part.is_empty() {
            return Some(start);
        }
        start += part.len() + 1;
    }
    None
}

fn parse_wildcard(
    text: &str,
    chars: &[char],
) -> Result<SelectionClause, (usize, SyntaxErrorKind)> {
    if let Some(pos) = chars.iter().position(|&c| c == '+') {
        let at_boundary = chars[..pos].iter().all(|&c| is_marker(c))
            || chars[pos..].iter().all(|&c| is_marker(c));
        let kind = if at_boundary {
            SyntaxErrorKind::MarkersOnWildcard
        } else {
            SyntaxErrorKind::UnexpectedMarker('+')
        };
        return Err((pos, kind));
    }
    if let Some(pos) = empty_component_at(chars) {
        return Err((pos, SyntaxErrorKind::EmptyComponent));
    }

    let pattern = WildcardPattern::new(text)
        .map_err(|e| (0, SyntaxErrorKind::InvalidPattern(e.to_string())))?;

    Ok(SelectionClause::new(
        text,
        KeyPattern::Wildcard(pattern),
        TraversalDepth::NONE,
        TraversalDepth::NONE,
    ))
}

fn parse_traversal(
    text: &str,
    chars: &[char],
    lead: usize,
    trail_start: usize,
) -> Result<SelectionClause, (usize, SyntaxErrorKind)> {
    let key_chars = &chars[lead..trail_start];
    if let Some(pos) = key_chars.iter().position(|&c| is_marker(c)) {
        return Err((lead + pos, SyntaxErrorKind::UnexpectedMarker(key_chars[pos])));
    }

    let key_text: String = key_chars.iter().collect();
    let key = AssetKey::parse(&key_text)
        .map_err(|e| (lead + e.offset, SyntaxErrorKind::EmptyComponent))?;

    Ok(SelectionClause::new(
        text,
        KeyPattern::Literal(key),
        depth_from_run(&chars[..lead]),
        depth_from_run(&chars[trail_start..]),
    ))
}

/// A run is homogeneous by the time we get here: `*` or `+`, `++`, ...
fn depth_from_run(run: &[char]) -> TraversalDepth {
    match run.first() {
        None => TraversalDepth::NONE,
        Some('*') => TraversalDepth::Unbounded,
        Some(_) => TraversalDepth::Layers(run.len()),
    }
}
