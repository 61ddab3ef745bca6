//! In-memory metadata cache.
//!
//! Entries live until they are invalidated or the owning client is dropped.
//! There is no TTL: freshness is driven by revalidation webhooks only.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use crate::document::MetadataDocument;
use crate::path::normalize_path;

/// Cache key for a page's metadata.
///
/// Can only be built from a normalized path, so a lookup can never bypass
/// normalization. The root sentinel stands for "no path" (layout-level
/// metadata).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(Option<String>);

impl CacheKey {
    /// Reserved key used when no path is supplied.
    pub const ROOT_SENTINEL: &'static str = "__pagemeta_root__";

    /// Build the key for a caller-supplied path.
    pub fn for_path(path: Option<&str>) -> Self {
        Self(normalize_path(path))
    }

    /// The root sentinel key.
    pub fn root() -> Self {
        Self(None)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_none()
    }

    /// The normalized path, or `None` for the root sentinel.
    pub fn path(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or(Self::ROOT_SENTINEL))
    }
}

/// Thread-safe map from [`CacheKey`] to the last fetched document.
///
/// Reads and writes never hold the lock across an await point.
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: RwLock<HashMap<CacheKey, MetadataDocument>>,
}

impl MetadataCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<MetadataDocument> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Store a document, replacing any previous entry for the key.
    pub fn insert(&self, key: CacheKey, document: MetadataDocument) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, document);
    }

    /// Remove a single entry. Returns `true` if an entry was present.
    pub fn remove(&self, key: &CacheKey) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
