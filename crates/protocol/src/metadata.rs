//! Metadata - Typed side-channel data attached to a message
//!
//! Hooks use the metadata map to publish values for stages further down the
//! pipeline without touching the payload. Keys are well-known strings agreed
//! on between hooks; inserting under an existing key replaces the prior
//! datum (last writer wins).

use std::collections::HashMap;

/// One typed metadata value
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MDatum {
    /// A string datum
    String(String),
}

impl MDatum {
    /// Create a string datum
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Get the datum as a string slice, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
        }
    }
}

/// Metadata map attached to a message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: HashMap<String, MDatum>,
}

impl Metadata {
    /// Create an empty metadata map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a datum under a key
    ///
    /// Returns the prior datum if the key was already present
    /// (last writer wins).
    pub fn insert(&mut self, key: impl Into<String>, datum: MDatum) -> Option<MDatum> {
        self.entries.insert(key.into(), datum)
    }

    /// Look up a datum by key
    pub fn get(&self, key: &str) -> Option<&MDatum> {
        self.entries.get(key)
    }

    /// Check if a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MDatum)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
