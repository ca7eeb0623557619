//! Read-through caching in front of the adapter.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::adapter;
use asf_rest_adapter::rest::{CacheError, CacheErrorKind, ErrorKind};
use asf_rest_adapter::{CacheStore, CachedAdapter, CachedOperation, MemoryCache};

fn cached(server: &MockServer, type_name: &str) -> (CachedAdapter, Arc<MemoryCache>) {
    let store = Arc::new(MemoryCache::new());
    let cached = CachedAdapter::new(adapter(server, type_name), store.clone());
    (cached, store)
}

#[tokio::test]
async fn test_describe_is_fetched_once() {
    let server = MockServer::start().await;
    let describe = r#"{"name":"Account","fields":[{"name":"Id","type":"id"}]}"#;

    Mock::given(method("GET"))
        .and(path("/services/data/v21.0/sobjects/Account/describe"))
        .respond_with(ResponseTemplate::new(200).set_body_string(describe))
        .expect(1)
        .mount(&server)
        .await;

    let (accounts, store) = cached(&server, "Account");

    let first = accounts.get_detail_info().await.unwrap();
    let second = accounts.get_detail_info().await.unwrap();

    assert_eq!(first, describe);
    assert_eq!(first, second);
    assert_eq!(store.keys(), vec!["Account/describe".to_string()]);
}

#[tokio::test]
async fn test_each_raw_read_is_fetched_once() {
    let server = MockServer::start().await;

    for route in [
        "/services/data/v21.0/sobjects/Account/",
        "/services/data/v21.0/sobjects/",
        "/services/data/v21.0/",
        "/services/data/",
        "/services/data/v21.0/sobjects/Account/001000000000001AAA",
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(r#"{{"route":"{route}"}}"#)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let (accounts, store) = cached(&server, "Account");

    for _ in 0..2 {
        assert_eq!(accounts.get_meta_data().await.unwrap().status, 200);
        assert_eq!(accounts.describe_global().await.unwrap().status, 200);
        assert_eq!(accounts.list_available_resources().await.unwrap().status, 200);
        assert_eq!(accounts.get_version().await.unwrap().status, 200);
        assert_eq!(accounts.find("001000000000001AAA").await.unwrap().status, 200);
    }

    assert_eq!(
        store.keys(),
        vec![
            "Account/describe_global".to_string(),
            "Account/find?001000000000001AAA".to_string(),
            "Account/get_version".to_string(),
            "Account/list_available_resources".to_string(),
            "Account/meta_data".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_cached_soql_round_trip_is_field_for_field_equal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/data/v21.0/query"))
        .and(query_param("q", "SELECT Id FROM Account"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"totalSize":1,"done":true,"records":[{"Id":"001"}]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (accounts, _store) = cached(&server, "Account");
    let query = "SELECT%20Id%20FROM%20Account";

    let first = accounts.run_soql(query).await.unwrap();
    let second = accounts.run_soql(query).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.status, second.status);
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn test_different_queries_use_different_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/data/v21.0/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(2)
        .mount(&server)
        .await;

    let (accounts, store) = cached(&server, "Account");

    accounts.run_sosl("FIND+%7BAcme%7D").await.unwrap();
    accounts.run_sosl("FIND+%7BGlobex%7D").await.unwrap();
    accounts.run_sosl("FIND+%7BAcme%7D").await.unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(
        accounts.cache_key(CachedOperation::Sosl, Some("FIND+%7BAcme%7D")),
        accounts.cache_key(CachedOperation::Sosl, Some("FIND+%7BAcme%7D"))
    );
}

#[tokio::test]
async fn test_keys_are_scoped_by_type_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/data/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(2)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCache::new());
    let accounts = CachedAdapter::new(adapter(&server, "Account"), store.clone());
    let contacts = CachedAdapter::new(adapter(&server, "Contact"), store.clone());

    accounts.get_version().await.unwrap();
    contacts.get_version().await.unwrap();

    assert_eq!(
        store.keys(),
        vec![
            "Account/get_version".to_string(),
            "Contact/get_version".to_string()
        ]
    );
}

#[tokio::test]
async fn test_describe_failure_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/data/v21.0/sobjects/Account/describe"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"[{"message":"Bad field"}]"#))
        .expect(2)
        .mount(&server)
        .await;

    let (accounts, store) = cached(&server, "Account");

    for _ in 0..2 {
        let err = accounts.get_detail_info().await.unwrap_err();
        assert!(err.to_string().contains("HTTP code 400"));
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_entries_never_expire_until_evicted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/data/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"version":"21.0"}]"#))
        .expect(2)
        .mount(&server)
        .await;

    let (accounts, store) = cached(&server, "Account");

    accounts.get_version().await.unwrap();
    accounts.get_version().await.unwrap();
    store.clear();
    accounts.get_version().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_misses_each_reach_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/data/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1..=2)
        .mount(&server)
        .await;

    let (accounts, store) = cached(&server, "Account");
    let (a, b) = tokio::join!(accounts.get_version(), accounts.get_version());

    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(store.len(), 1);
}

#[derive(Debug)]
struct UnreachableCache;

#[async_trait]
impl CacheStore for UnreachableCache {
    async fn exists(&self, _key: &str) -> Result<bool, CacheError> {
        Err(CacheError::new(CacheErrorKind::Backend(
            "connection refused".to_string(),
        )))
    }

    async fn read(&self, key: &str) -> Result<Bytes, CacheError> {
        Err(CacheError::missing(key))
    }

    async fn write(&self, _key: &str, _value: Bytes) -> Result<(), CacheError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_backend_failure_propagates_before_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let accounts = CachedAdapter::new(adapter(&server, "Account"), Arc::new(UnreachableCache));
    let err = accounts.get_version().await.unwrap_err();

    assert!(matches!(err.kind, ErrorKind::Cache(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_writes_bypass_the_cache() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/services/data/v21.0/sobjects/Account/001000000000001AAA"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let (accounts, store) = cached(&server, "Account");
    accounts.adapter().delete("001000000000001AAA").await.unwrap();
    accounts.adapter().delete("001000000000001AAA").await.unwrap();
    assert!(store.is_empty());
}
