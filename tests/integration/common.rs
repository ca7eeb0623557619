use asf_rest_adapter::rest::ClientConfig;
use asf_rest_adapter::{AdapterConfig, SObjectAdapter};
use wiremock::MockServer;

pub const TOKEN: &str = "00Dxx0000001gPL!AQ4AQIntegrationToken";

/// Config pointed at the mock server, with the caller's API version.
pub fn config(server: &MockServer, api_version: &str) -> AdapterConfig {
    AdapterConfig::configure(TOKEN, server.uri(), api_version)
        .expect("mock server config should be valid")
}

/// An adapter for `type_name` talking to the mock server.
pub fn adapter(server: &MockServer, type_name: &str) -> SObjectAdapter {
    SObjectAdapter::with_client_config(
        config(server, "v21.0"),
        type_name,
        ClientConfig::builder().with_tracing(false).build(),
    )
    .expect("adapter should build")
}

/// The header value every request must carry.
pub fn authorization() -> String {
    format!("OAuth {TOKEN}")
}
