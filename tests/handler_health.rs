mod common;

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::Value;
use shortlink::domain::clock::SystemClock;
use shortlink::infrastructure::cache::{CacheError, CacheResult, CacheService, NullCache};
use shortlink::infrastructure::persistence::InMemoryMappingRepository;
use shortlink::routes::router;
use shortlink::state::{AppState, ServiceSettings};
use shortlink::utils::code_generator::RandomCodeGenerator;
use std::sync::Arc;

struct DownCache;

#[async_trait]
impl CacheService for DownCache {
    async fn get_url(&self, _short_code: &str) -> CacheResult<Option<String>> {
        Err(CacheError::ConnectionError("down".to_string()))
    }

    async fn set_url(
        &self,
        _short_code: &str,
        _original_url: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Err(CacheError::ConnectionError("down".to_string()))
    }

    async fn invalidate(&self, _short_code: &str) -> CacheResult<()> {
        Err(CacheError::ConnectionError("down".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

fn server_with_cache(cache: Arc<dyn CacheService>) -> TestServer {
    let state = AppState::new(
        Arc::new(InMemoryMappingRepository::new()),
        cache,
        Arc::new(RandomCodeGenerator),
        Arc::new(SystemClock),
        &ServiceSettings::default(),
    );
    TestServer::new(router(state)).unwrap()
}

#[tokio::test]
async fn test_health_ok() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["cache"]["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_health_with_disabled_cache() {
    let server = server_with_cache(Arc::new(NullCache::new()));

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["checks"]["cache"]["message"], "none reachable");
}

#[tokio::test]
async fn test_health_degraded_when_cache_down() {
    let server = server_with_cache(Arc::new(DownCache));

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["cache"]["status"], "error");
    assert_eq!(body["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn test_redirect_survives_cache_outage() {
    let server = server_with_cache(Arc::new(DownCache));

    let created: Value = server
        .post("/url/shorten")
        .json(&serde_json::json!({ "originalUrl": "https://example.com" }))
        .await
        .json();
    let short_url = created["shortUrl"].as_str().unwrap();
    let code = short_url.rsplit('/').next().unwrap();

    let response = server.get(&format!("/url/{}", code)).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com");
}
