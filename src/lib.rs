//! # asf-rest-adapter
//!
//! Maps the Force.com `sobjects` REST endpoints onto host model types, with
//! an optional read-through cache in front of the read operations.
//!
//! ## Security
//!
//! - The session token is redacted in Debug output
//! - Tracing spans skip the token
//! - Surfaced error messages are sanitized
//!
//! ## Crates
//!
//! - **asf-client** - HTTP transport: OAuth header, PATCH, raw responses
//! - **asf-rest** - the sobjects adapter, cache port and read-through wrapper
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use asf_rest_adapter::{AdapterConfig, CachedAdapter, MemoryCache, SObjectAdapter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AdapterConfig::from_env()?;
//!     let accounts = CachedAdapter::new(
//!         SObjectAdapter::new(config, "Account")?,
//!         Arc::new(MemoryCache::new()),
//!     );
//!
//!     let rows = accounts.run_soql("SELECT+Id,Name+FROM+Account+LIMIT+10").await?;
//!     println!("{} {}", rows.status, rows.body);
//!
//!     Ok(())
//! }
//! ```

// Re-export both crates for convenient access
pub use asf_client as client;
pub use asf_rest as rest;

// Re-export commonly used types at the top level
pub use asf_client::{ClientConfig, RawResponse};
pub use asf_rest::{
    AdapterConfig, CacheKey, CacheStore, CachedAdapter, CachedOperation, MemoryCache, SObject,
    SObjectAdapter,
};
