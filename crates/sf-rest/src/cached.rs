//! Read-through caching for the idempotent read operations.
//!
//! One generic decorator, [`read_through`], serves every cached operation.
//! Entries are written only after the underlying call returns `Ok`, and are
//! never invalidated here: staleness is the cache backend's problem.
//! Concurrent misses on the same key each reach the network and each
//! overwrite the entry; the reads are idempotent so the last write wins.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use asf_client::RawResponse;

use crate::adapter::SObjectAdapter;
use crate::cache::CacheStore;
use crate::error::Result;

/// The cached read operations and their names in cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachedOperation {
    DetailInfo,
    MetaData,
    DescribeGlobal,
    ListAvailableResources,
    Version,
    Soql,
    Sosl,
    Find,
}

impl CachedOperation {
    /// Name used in the cache key.
    pub fn name(&self) -> &'static str {
        match self {
            CachedOperation::DetailInfo => "describe",
            CachedOperation::MetaData => "meta_data",
            CachedOperation::DescribeGlobal => "describe_global",
            CachedOperation::ListAvailableResources => "list_available_resources",
            CachedOperation::Version => "get_version",
            CachedOperation::Soql => "run_soql",
            CachedOperation::Sosl => "run_sosl",
            CachedOperation::Find => "find",
        }
    }
}

/// Deterministic cache key: `Type/operation` or `Type/operation?argument`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build the key for an operation on a type.
    pub fn new(type_name: &str, operation: CachedOperation, argument: Option<&str>) -> Self {
        match argument {
            Some(arg) => Self(format!("{type_name}/{}?{arg}", operation.name())),
            None => Self(format!("{type_name}/{}", operation.name())),
        }
    }

    /// The key as stored in the backend.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Return the cached value for `key`, or run `fetch`, store its JSON
/// encoding under `key` and return it.
///
/// Errors from `fetch` return before anything is written. Backend and
/// decoding errors propagate unchanged.
pub async fn read_through<T, F, Fut>(store: &dyn CacheStore, key: &CacheKey, fetch: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if store.exists(key.as_str()).await? {
        let raw = store.read(key.as_str()).await?;
        let value = serde_json::from_slice(&raw)?;
        debug!(key = %key, "cache hit");
        return Ok(value);
    }

    debug!(key = %key, "cache miss");
    let value = fetch().await?;
    let encoded = serde_json::to_vec(&value)?;
    store.write(key.as_str(), Bytes::from(encoded)).await?;
    Ok(value)
}

/// [`SObjectAdapter`] with its read operations routed through a cache.
///
/// Writes (`save`, `update`, `delete`) are not cached and do not evict;
/// reach them through [`adapter`](Self::adapter).
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use asf_rest::{CachedAdapter, MemoryCache, SObjectAdapter};
///
/// let cached = CachedAdapter::new(SObjectAdapter::new(config, "Account")?, Arc::new(MemoryCache::new()));
/// let schema = cached.get_detail_info().await?; // network
/// let again = cached.get_detail_info().await?;  // cache
/// ```
#[derive(Debug, Clone)]
pub struct CachedAdapter {
    adapter: SObjectAdapter,
    store: Arc<dyn CacheStore>,
}

impl CachedAdapter {
    /// Wrap an adapter with a cache backend.
    pub fn new(adapter: SObjectAdapter, store: Arc<dyn CacheStore>) -> Self {
        Self { adapter, store }
    }

    /// The uncached adapter.
    pub fn adapter(&self) -> &SObjectAdapter {
        &self.adapter
    }

    /// The cache backend.
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// The key a cached operation reads and writes.
    pub fn cache_key(&self, operation: CachedOperation, argument: Option<&str>) -> CacheKey {
        CacheKey::new(self.adapter.type_name(), operation, argument)
    }

    /// Cached [`SObjectAdapter::get_detail_info`].
    #[instrument(skip(self), fields(sobject = %self.adapter.type_name()))]
    pub async fn get_detail_info(&self) -> Result<String> {
        let key = self.cache_key(CachedOperation::DetailInfo, None);
        read_through(self.store.as_ref(), &key, || self.adapter.get_detail_info()).await
    }

    /// Cached [`SObjectAdapter::get_meta_data`].
    #[instrument(skip(self), fields(sobject = %self.adapter.type_name()))]
    pub async fn get_meta_data(&self) -> Result<RawResponse> {
        let key = self.cache_key(CachedOperation::MetaData, None);
        read_through(self.store.as_ref(), &key, || self.adapter.get_meta_data()).await
    }

    /// Cached [`SObjectAdapter::describe_global`].
    #[instrument(skip(self), fields(sobject = %self.adapter.type_name()))]
    pub async fn describe_global(&self) -> Result<RawResponse> {
        let key = self.cache_key(CachedOperation::DescribeGlobal, None);
        read_through(self.store.as_ref(), &key, || self.adapter.describe_global()).await
    }

    /// Cached [`SObjectAdapter::list_available_resources`].
    #[instrument(skip(self), fields(sobject = %self.adapter.type_name()))]
    pub async fn list_available_resources(&self) -> Result<RawResponse> {
        let key = self.cache_key(CachedOperation::ListAvailableResources, None);
        read_through(self.store.as_ref(), &key, || {
            self.adapter.list_available_resources()
        })
        .await
    }

    /// Cached [`SObjectAdapter::get_version`].
    #[instrument(skip(self), fields(sobject = %self.adapter.type_name()))]
    pub async fn get_version(&self) -> Result<RawResponse> {
        let key = self.cache_key(CachedOperation::Version, None);
        read_through(self.store.as_ref(), &key, || self.adapter.get_version()).await
    }

    /// Cached [`SObjectAdapter::run_soql`], keyed by the query text.
    #[instrument(skip(self), fields(sobject = %self.adapter.type_name()))]
    pub async fn run_soql(&self, query: &str) -> Result<RawResponse> {
        let key = self.cache_key(CachedOperation::Soql, Some(query));
        read_through(self.store.as_ref(), &key, || self.adapter.run_soql(query)).await
    }

    /// Cached [`SObjectAdapter::run_sosl`], keyed by the search text.
    #[instrument(skip(self), fields(sobject = %self.adapter.type_name()))]
    pub async fn run_sosl(&self, search: &str) -> Result<RawResponse> {
        let key = self.cache_key(CachedOperation::Sosl, Some(search));
        read_through(self.store.as_ref(), &key, || self.adapter.run_sosl(search)).await
    }

    /// Cached [`SObjectAdapter::find`], keyed by record id.
    #[instrument(skip(self), fields(sobject = %self.adapter.type_name()))]
    pub async fn find(&self, id: &str) -> Result<RawResponse> {
        let key = self.cache_key(CachedOperation::Find, Some(id));
        read_through(self.store.as_ref(), &key, || self.adapter.find(id)).await
    }
}
