//! Adapter configuration: credential, instance host and API version.

use crate::error::{Error, ErrorKind, Result};

/// API version every hand-built operation path uses.
///
/// `configure` accepts a version argument but the operation paths stay on
/// this value; the requested version only feeds the resource site prefix
/// used by [`AdapterConfig::site_prefix`]. See DESIGN.md, "API version".
pub const PINNED_API_VERSION: &str = "v21.0";

/// Environment variable holding the OAuth/session token.
pub const ENV_ACCESS_TOKEN: &str = "SF_ACCESS_TOKEN";
/// Environment variable holding the instance host.
pub const ENV_INSTANCE_URL: &str = "SF_INSTANCE_URL";
/// Environment variable holding the API version.
pub const ENV_API_VERSION: &str = "SF_API_VERSION";

/// Immutable adapter configuration.
///
/// Build it once at startup and move it into each
/// [`SObjectAdapter`](crate::SObjectAdapter). The token is redacted in
/// `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    access_token: String,
    base_url: String,
    requested_api_version: String,
}

impl std::fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .field("requested_api_version", &self.requested_api_version)
            .finish()
    }
}

impl AdapterConfig {
    /// Configure the adapter.
    ///
    /// `base_url` is a host such as `na7.salesforce.com`; `https://` is
    /// prepended. A value that already has an `http://` or `https://`
    /// scheme is used as given.
    pub fn configure(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Result<Self> {
        let access_token = access_token.into();
        let base_url = base_url.into();
        let requested_api_version = api_version.into();

        if access_token.trim().is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "access token must not be empty".to_string(),
            )));
        }
        let host = base_url.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "base URL must not be empty".to_string(),
            )));
        }

        let base_url = if host.starts_with("https://") || host.starts_with("http://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };

        Ok(Self {
            access_token,
            base_url,
            requested_api_version,
        })
    }

    /// Load the configuration from `SF_ACCESS_TOKEN`, `SF_INSTANCE_URL`
    /// and `SF_API_VERSION` (the last defaults to [`PINNED_API_VERSION`]).
    pub fn from_env() -> Result<Self> {
        let token = required_env(ENV_ACCESS_TOKEN)?;
        let base_url = required_env(ENV_INSTANCE_URL)?;
        let version =
            std::env::var(ENV_API_VERSION).unwrap_or_else(|_| PINNED_API_VERSION.to_string());
        Self::configure(token, base_url, version)
    }

    /// The OAuth/session token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Scheme and host (and port, if one was given), without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The version passed to [`configure`](Self::configure).
    pub fn requested_api_version(&self) -> &str {
        &self.requested_api_version
    }

    /// The version used in operation paths. Always [`PINNED_API_VERSION`].
    pub fn api_version(&self) -> &str {
        PINNED_API_VERSION
    }

    /// Resource site prefix: `/services/data/{requested version}/sobjects/`.
    pub fn site_prefix(&self) -> String {
        format!("/services/data/{}/sobjects/", self.requested_api_version)
    }

    /// Absolute URL for a path starting with `/`.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn required_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::new(ErrorKind::Config(format!(
            "environment variable {name} is not set"
        )))),
    }
}
