// src/selection/pattern.rs

use std::fmt;

use regex::Regex;

use crate::graph::AssetKey;

/// Wildcard match against an asset key's joined (`a/b/c`) form.
///
/// `*` matches zero or more characters, `/` included. Every other character
/// is literal, so the match is anchored at both ends: `*zones*` is a
/// substring test, `taxi*` a prefix test.
#[derive(Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let body = source
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let regex = Regex::new(&format!("(?s)^{body}$"))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as written in the clause.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, key: &AssetKey) -> bool {
        self.regex.is_match(&key.to_string())
    }
}

impl fmt::Debug for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WildcardPattern").field(&self.source).finish()
    }
}

impl PartialEq for WildcardPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for WildcardPattern {}
