//! Environment-driven configuration.
//!
//! This is the only test touching the `SF_*` variables, so it runs its
//! steps in sequence inside one test.

use asf_rest_adapter::rest::{ErrorKind, ENV_ACCESS_TOKEN, ENV_API_VERSION, ENV_INSTANCE_URL};
use asf_rest_adapter::AdapterConfig;

#[test]
fn test_from_env() {
    std::env::remove_var(ENV_ACCESS_TOKEN);
    std::env::remove_var(ENV_INSTANCE_URL);
    std::env::remove_var(ENV_API_VERSION);

    let err = AdapterConfig::from_env().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Config(_)));
    assert!(err.to_string().contains(ENV_ACCESS_TOKEN));

    std::env::set_var(ENV_ACCESS_TOKEN, "00Dxx!envtoken");
    std::env::set_var(ENV_INSTANCE_URL, "na7.salesforce.com");

    let config = AdapterConfig::from_env().unwrap();
    assert_eq!(config.base_url(), "https://na7.salesforce.com");
    assert_eq!(config.requested_api_version(), "v21.0");

    std::env::set_var(ENV_API_VERSION, "v22.0");
    let config = AdapterConfig::from_env().unwrap();
    assert_eq!(config.requested_api_version(), "v22.0");
    assert_eq!(config.api_version(), "v21.0");

    std::env::remove_var(ENV_ACCESS_TOKEN);
    std::env::remove_var(ENV_INSTANCE_URL);
    std::env::remove_var(ENV_API_VERSION);
}
