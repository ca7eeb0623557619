//! # asf-client
//!
//! HTTP transport for the Force.com `sobjects` REST adapter.
//!
//! This crate is deliberately thin:
//! - Every request carries `Authorization: OAuth <token>`
//! - PATCH is a first-class request method
//! - Responses come back raw (status + body), whatever the status code
//! - No connection reuse by default: each call opens a fresh connection
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    asf-rest                                 │
//! │  (SObjectAdapter, CachedAdapter)                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - One request, one round trip                              │
//! │  - RawResponse { status, body }                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use asf_client::{ClientConfig, SfHttpClient};
//!
//! let http = SfHttpClient::new(ClientConfig::default())?;
//! let response = http
//!     .execute(http.get("https://na7.salesforce.com/services/data/").oauth_auth(token))
//!     .await?;
//! println!("{} {}", response.status, response.body);
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
pub mod security;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::{sanitize_error_message, RawResponse};

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("asf-rest-adapter/", env!("CARGO_PKG_VERSION"));

/// Media type used for every request and response body.
pub const JSON_CONTENT_TYPE: &str = "application/json";
