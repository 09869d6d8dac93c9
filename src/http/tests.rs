//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::types::BackoffType;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts).with_backoff(
        BackoffType::Constant,
        Duration::from_millis(10),
        Duration::from_millis(100),
    )
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.retry.max_attempts, 3);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .retry(RetryPolicy::new(5))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("page", "1")
        .query("limit", "10")
        .header("X-Request-Id", "abc123")
        .json(serde_json::json!({"key": "value"}))
        .timeout(Duration::from_secs(10))
        .attempts(2);

    assert_eq!(config.query.get("page"), Some(&"1".to_string()));
    assert_eq!(config.query.get("limit"), Some(&"10".to_string()));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(config.body.is_some());
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_attempts, Some(2));
}

#[tokio::test]
async fn test_http_client_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [{"id": 1, "name": "Alice"}]
        })))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let response = client.get("/api/users").await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": 42
        })))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let data: serde_json::Value = client.get_json("/api/data").await.unwrap();

    assert_eq!(data["value"], 42);
}

#[tokio::test]
async fn test_http_client_post() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 123,
            "created": true
        })))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let response = client
        .post("/api/items", serde_json::json!({"name": "test"}))
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_http_client_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "test"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": []
        })))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let response = client
        .get_with_config(
            "/api/search",
            RequestConfig::new().query("q", "test").query("page", "2"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/secure"))
        .and(header("X-API-Key", "secret123"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-API-Key", "secret123")
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let response = client.get("/api/secure").await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_404_fails_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .retry(fast_retry(3))
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let result = client.get("/api/missing").await;

    let err = result.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_http_client_retry_on_500() {
    let mock_server = MockServer::start().await;

    // First two calls return 500, third succeeds
    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .retry(fast_retry(3))
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let response = client.get("/api/flaky").await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_retry_on_429() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limited"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .retry(fast_retry(2))
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let response = client.get("/api/limited").await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_surfaces_final_error_after_exhaustion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/always-fail"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Server error"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .retry(fast_retry(2))
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let err = client.get("/api/always-fail").await.unwrap_err();

    // The original error from the last attempt, not a synthetic one
    assert!(matches!(err, Error::HttpStatus { status: 503, ref body } if body == "Server error"));
}

#[tokio::test]
async fn test_http_client_per_request_attempt_override() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fail"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .retry(fast_retry(3))
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let result = client
        .get_with_config("/api/fail", RequestConfig::new().attempts(1))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_http_client_full_url_passthrough() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/test"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    // Client without base URL
    let config = HttpClientConfig::builder().no_rate_limit().build();
    let client = HttpClient::with_config(config);

    let response = client
        .get(&format!("{}/api/test", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_joins_paths_with_single_slash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&mock_server)
        .await;

    // Trailing slash on base, leading slash on endpoint
    let config = HttpClientConfig::builder()
        .base_url(format!("{}/", mock_server.uri()))
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config);

    assert_eq!(client.get("/v1/items").await.unwrap().status(), 200);
    assert_eq!(client.get("v1/items").await.unwrap().status(), 200);
}

#[tokio::test]
async fn test_http_client_with_rate_limiter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .rate_limit(RateLimiterConfig::new(100, Duration::from_secs(1)))
        .build();

    let client = HttpClient::with_config(config);

    for _ in 0..3 {
        let response = client.get("/api/data").await.unwrap();
        assert_eq!(response.status(), 200);
    }
}

#[test]
fn test_http_client_debug() {
    let client = HttpClient::new();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("config"));
}

#[test]
fn test_http_client_default_has_rate_limiter() {
    let client = HttpClient::default();
    assert!(client.has_rate_limiter());
}
