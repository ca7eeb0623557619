//! The sobjects REST adapter.
//!
//! Each operation builds one path, sends one request and hands back the raw
//! response. Only [`SObjectAdapter::get_detail_info`] looks at the status
//! code; everything else returns whatever the server said.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use asf_client::security::soql;
use asf_client::{
    sanitize_error_message, ClientConfig, RawResponse, RequestBuilder, RequestMethod,
    SfHttpClient,
};

use crate::config::AdapterConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::path;

/// Message used when the describe endpoint fails with an empty error array.
const NO_ERROR_MESSAGE: &str = "no error message returned";

/// A host model type backed by a remote sobject type.
///
/// The default name is the Rust type name with its module path removed, so
/// `crm::models::Account` maps to `Account`. Override it when the names differ.
///
/// ```rust
/// use asf_rest::SObject;
///
/// struct Account;
/// impl SObject for Account {}
///
/// struct Invoice;
/// impl SObject for Invoice {
///     fn sobject_name() -> &'static str {
///         "Invoice__c"
///     }
/// }
///
/// assert_eq!(Account::sobject_name(), "Account");
/// assert_eq!(Invoice::sobject_name(), "Invoice__c");
/// ```
pub trait SObject {
    /// Remote type name, used verbatim as the collection segment.
    ///
    /// Defaults to the Rust type name without its module path. Generic
    /// parameters are dropped, so `Wrapper<crate::Account>` maps to `Wrapper`.
    fn sobject_name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Error body returned by the REST API: an array of these.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// REST adapter bound to one sobject type.
///
/// # Example
///
/// ```rust,ignore
/// use asf_rest::{AdapterConfig, SObjectAdapter};
///
/// let config = AdapterConfig::configure(token, "na7.salesforce.com", "v21.0")?;
/// let accounts = SObjectAdapter::new(config, "Account")?;
///
/// let created = accounts.save(&serde_json::json!({"Name": "Acme"})).await?;
/// let describe = accounts.get_detail_info().await?;
/// let rows = accounts.run_soql("SELECT+Id+FROM+Account").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SObjectAdapter {
    http: SfHttpClient,
    config: AdapterConfig,
    type_name: String,
}

impl SObjectAdapter {
    /// Create an adapter for `type_name` with the default transport settings.
    pub fn new(config: AdapterConfig, type_name: impl Into<String>) -> Result<Self> {
        Self::with_client_config(config, type_name, ClientConfig::default())
    }

    /// Create an adapter with custom transport settings.
    pub fn with_client_config(
        config: AdapterConfig,
        type_name: impl Into<String>,
        client_config: ClientConfig,
    ) -> Result<Self> {
        let http = SfHttpClient::new(client_config)?;
        Self::from_parts(http, config, type_name.into())
    }

    /// Create an adapter for a host model type.
    pub fn for_model<T: SObject>(config: AdapterConfig) -> Result<Self> {
        Self::new(config, T::sobject_name())
    }

    /// An adapter for another type sharing this one's transport and config.
    pub fn sibling(&self, type_name: impl Into<String>) -> Result<Self> {
        Self::from_parts(self.http.clone(), self.config.clone(), type_name.into())
    }

    fn from_parts(http: SfHttpClient, config: AdapterConfig, type_name: String) -> Result<Self> {
        if !soql::is_safe_sobject_name(&type_name) {
            return Err(Error::new(ErrorKind::InvalidSObject(type_name)));
        }
        Ok(Self {
            http,
            config,
            type_name,
        })
    }

    /// The sobject type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The adapter configuration.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    // =========================================================================
    // Record operations
    // =========================================================================

    /// Create a record: `POST /services/data/{ver}/sobjects/{Type}/`.
    ///
    /// The attributes are sent as a flat JSON object, not wrapped under the
    /// type name.
    #[instrument(skip(self, attributes), fields(sobject = %self.type_name))]
    pub async fn save<A: Serialize + ?Sized>(&self, attributes: &A) -> Result<RawResponse> {
        let body = serde_json::to_value(attributes)?;
        let path = path::sobject_collection(self.config.api_version(), &self.type_name);
        let request = self.request(RequestMethod::Post, &path).json_value(body);
        self.send(request).await
    }

    /// Delete a record: `DELETE /services/data/{ver}/sobjects/{Type}/{id}`.
    #[instrument(skip(self), fields(sobject = %self.type_name))]
    pub async fn delete(&self, id: &str) -> Result<RawResponse> {
        let path = path::sobject_element(self.config.api_version(), &self.type_name, id);
        self.send(self.request(RequestMethod::Delete, &path)).await
    }

    /// Update a record: `PATCH /services/data/{ver}/sobjects/{Type}/{id}`.
    ///
    /// `json` is sent byte for byte.
    #[instrument(skip(self, json), fields(sobject = %self.type_name))]
    pub async fn update(&self, id: &str, json: impl Into<String>) -> Result<RawResponse> {
        let path = path::sobject_element(self.config.api_version(), &self.type_name, id);
        let request = self.request(RequestMethod::Patch, &path).json_text(json);
        self.send(request).await
    }

    /// Fetch a record through the resource site: `GET {element_path(id)}`.
    #[instrument(skip(self), fields(sobject = %self.type_name))]
    pub async fn find(&self, id: &str) -> Result<RawResponse> {
        let path = self.element_path(id, &[]);
        self.send(self.request(RequestMethod::Get, &path)).await
    }

    // =========================================================================
    // Describe and discovery
    // =========================================================================

    /// Full schema of the type: `GET /services/data/{ver}/sobjects/{Type}/describe`.
    ///
    /// Unlike every other operation, a status other than 200 is an error:
    /// [`ErrorKind::DetailInfo`] with the status and the first message from
    /// the error array in the body.
    #[instrument(skip(self), fields(sobject = %self.type_name))]
    pub async fn get_detail_info(&self) -> Result<String> {
        let path = path::sobject_describe(self.config.api_version(), &self.type_name);
        let request = self.request(RequestMethod::Get, &path).content_type_json();
        let response = self.send(request).await?;

        if response.status != 200 {
            return Err(detail_info_error(&response));
        }
        Ok(response.body)
    }

    /// Basic metadata and recent items: `GET /services/data/{ver}/sobjects/{Type}/`.
    #[instrument(skip(self), fields(sobject = %self.type_name))]
    pub async fn get_meta_data(&self) -> Result<RawResponse> {
        let path = path::sobject_collection(self.config.api_version(), &self.type_name);
        let request = self.request(RequestMethod::Get, &path).content_type_json();
        self.send(request).await
    }

    /// Every sobject type in the org: `GET /services/data/{ver}/sobjects/`.
    #[instrument(skip(self), fields(sobject = %self.type_name))]
    pub async fn describe_global(&self) -> Result<RawResponse> {
        let path = path::sobjects_root(self.config.api_version());
        self.send(self.request(RequestMethod::Get, &path)).await
    }

    /// Resources of this API version: `GET /services/data/{ver}/`.
    #[instrument(skip(self), fields(sobject = %self.type_name))]
    pub async fn list_available_resources(&self) -> Result<RawResponse> {
        let path = path::resources_root(self.config.api_version());
        self.send(self.request(RequestMethod::Get, &path)).await
    }

    /// Available API versions: `GET /services/data/`.
    #[instrument(skip(self), fields(sobject = %self.type_name))]
    pub async fn get_version(&self) -> Result<RawResponse> {
        self.send(self.request(RequestMethod::Get, path::VERSIONS_ROOT))
            .await
    }

    // =========================================================================
    // Query and search
    // =========================================================================

    /// Run SOQL: `GET /services/data/{ver}/query?q={query}`.
    ///
    /// The query goes into the URL unescaped; encode it first (see
    /// [`asf_client::security::url::encode_param`]).
    #[instrument(skip(self), fields(sobject = %self.type_name))]
    pub async fn run_soql(&self, query: &str) -> Result<RawResponse> {
        let path = path::soql(self.config.api_version(), query);
        self.send(self.request(RequestMethod::Get, &path)).await
    }

    /// Run SOSL: `GET /services/data/{ver}/search/?q={search}`.
    ///
    /// Same encoding caveat as [`run_soql`](Self::run_soql).
    #[instrument(skip(self), fields(sobject = %self.type_name))]
    pub async fn run_sosl(&self, search: &str) -> Result<RawResponse> {
        let path = path::sosl(self.config.api_version(), search);
        self.send(self.request(RequestMethod::Get, &path)).await
    }

    // =========================================================================
    // Resource site paths
    // =========================================================================

    /// `{site}{Type}/{id}{?query}` under the requested API version.
    pub fn element_path(&self, id: &str, query: &[(&str, &str)]) -> String {
        path::element_path(&self.config.site_prefix(), &self.type_name, id, query)
    }

    /// `{site}{Type}{?query}` under the requested API version.
    pub fn collection_path(&self, query: &[(&str, &str)]) -> String {
        path::collection_path(&self.config.site_prefix(), &self.type_name, query)
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Build an authenticated request for a path on the configured host.
    pub fn request(&self, method: RequestMethod, path: &str) -> RequestBuilder {
        RequestBuilder::new(method, self.config.url(path)).oauth_auth(self.config.access_token())
    }

    async fn send(&self, request: RequestBuilder) -> Result<RawResponse> {
        debug!(
            method = %request.method(),
            url = %request.url(),
            sobject = %self.type_name,
            "sobjects request"
        );
        let response = self.http.execute(request).await?;
        debug!(status = response.status, "sobjects response");
        Ok(response)
    }
}

fn detail_info_error(response: &RawResponse) -> Error {
    let status = response.status;
    match serde_json::from_str::<Vec<ApiErrorBody>>(&response.body) {
        Ok(errors) => {
            let message = errors
                .into_iter()
                .next()
                .map(|e| sanitize_error_message(&e.message))
                .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string());
            Error::new(ErrorKind::DetailInfo { status, message })
        }
        Err(e) => Error::with_source(
            ErrorKind::DetailInfo {
                status,
                message: sanitize_error_message(&response.body),
            },
            e,
        ),
    }
}
