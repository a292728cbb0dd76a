// src/graph/key.rs

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Hierarchical asset identifier, e.g. `["manhattan", "manhattan_stats"]`.
///
/// Rendered (and serialized) as its components joined with `/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetKey {
    path: Vec<String>,
}

impl AssetKey {
    /// Build a key from already-split components.
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a `/`-joined key. Empty components are rejected.
    pub fn parse(text: &str) -> Result<Self, InvalidAssetKey> {
        text.parse()
    }

    /// Path components in order.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Last path component (the asset's own name).
    pub fn name(&self) -> &str {
        self.path.last().map(|s| s.as_str()).unwrap_or("")
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.join("/"))
    }
}

/// A `/`-joined key text with an empty component.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid asset key `{text}`: empty path component at offset {offset}")]
pub struct InvalidAssetKey {
    pub text: String,
    /// Character offset of the empty component.
    pub offset: usize,
}

impl FromStr for AssetKey {
    type Err = InvalidAssetKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut path = Vec::new();
        let mut offset = 0;
        for component in s.split('/') {
            if component.is_empty() {
                return Err(InvalidAssetKey {
                    text: s.to_string(),
                    offset,
                });
            }
            offset += component.chars().count() + 1;
            path.push(component.to_string());
        }
        Ok(Self { path })
    }
}

impl Serialize for AssetKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
