//! # asf-rest
//!
//! Force.com `sobjects` REST adapter with an optional read-through cache.
//!
//! ## Features
//!
//! - **Record operations** - save (POST), update (PATCH), delete, find
//! - **Describe** - per-type describe and metadata, global describe
//! - **Discovery** - available resources and API versions
//! - **SOQL / SOSL** - query and search, strings passed through as given
//! - **Caching** - any [`CacheStore`] in front of the read operations
//!
//! Responses are returned raw ([`RawResponse`]). The one exception is
//! [`SObjectAdapter::get_detail_info`], which turns a non-200 status into
//! an error.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use asf_rest::{AdapterConfig, CachedAdapter, MemoryCache, SObjectAdapter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), asf_rest::Error> {
//!     let config = AdapterConfig::configure(token, "na7.salesforce.com", "v21.0")?;
//!     let accounts = SObjectAdapter::new(config, "Account")?;
//!
//!     // Create
//!     let created = accounts.save(&serde_json::json!({"Name": "Acme"})).await?;
//!
//!     // Update (body sent verbatim)
//!     accounts.update("001000000000001AAA", r#"{"Name":"Acme Corp"}"#).await?;
//!
//!     // Cached describe
//!     let cached = CachedAdapter::new(accounts, Arc::new(MemoryCache::new()));
//!     let schema = cached.get_detail_info().await?;
//!
//!     Ok(())
//! }
//! ```

mod adapter;
pub mod cache;
mod cached;
mod config;
mod error;
pub mod path;

// Adapter
pub use adapter::{SObject, SObjectAdapter};

// Caching
pub use cache::{CacheError, CacheErrorKind, CacheStore, MemoryCache};
pub use cached::{read_through, CacheKey, CachedAdapter, CachedOperation};

// Configuration
pub use config::{
    AdapterConfig, ENV_ACCESS_TOKEN, ENV_API_VERSION, ENV_INSTANCE_URL, PINNED_API_VERSION,
};

// Error types
pub use error::{Error, ErrorKind, Result};

// Re-export asf-client types that users might need
pub use asf_client::{ClientConfig, ClientConfigBuilder, RawResponse, RequestMethod};
