//! External key/value cache port.
//!
//! The adapter only needs `exists`, `read` and `write`. Expiry and eviction
//! belong to the backend; nothing here passes a TTL.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;

/// Error raised by a cache backend.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct CacheError {
    /// The kind of error that occurred.
    pub kind: CacheErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CacheError {
    /// Create a new error with the given kind.
    pub fn new(kind: CacheErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: CacheErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// A read of a key that is not stored.
    pub fn missing(key: impl Into<String>) -> Self {
        Self::new(CacheErrorKind::Missing(key.into()))
    }
}

/// The kind of cache error.
#[derive(Debug, thiserror::Error)]
pub enum CacheErrorKind {
    /// Key not present.
    #[error("no cache entry for key {0}")]
    Missing(String),

    /// Backend unreachable or failing.
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Key/value store consulted before the network.
///
/// Implementations provide their own concurrency safety; callers do no
/// locking around `exists`/`read`/`write`.
#[async_trait]
pub trait CacheStore: std::fmt::Debug + Send + Sync {
    /// Whether a value is stored under `key`.
    async fn exists(&self, key: &str) -> Result<bool, CacheError>;

    /// The value stored under `key`. Reading an absent key is an error.
    async fn read(&self, key: &str) -> Result<Bytes, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: Bytes) -> Result<(), CacheError>;
}

/// In-process cache backend.
///
/// Entries live until [`clear`](Self::clear) or [`remove`](Self::remove);
/// there is no expiry.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Bytes>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop one entry, returning whether it existed.
    pub fn remove(&self, key: &str) -> bool {
        self.entries.write().remove(key).is_some()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.read().contains_key(key))
    }

    async fn read(&self, key: &str) -> Result<Bytes, CacheError> {
        self.entries
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| CacheError::missing(key))
    }

    async fn write(&self, key: &str, value: Bytes) -> Result<(), CacheError> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }
}
