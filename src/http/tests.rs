//! Tests for the HTTP client module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(server.uri()).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.initial_backoff, Duration::from_secs(1));
    assert_eq!(config.max_backoff, Duration::from_secs(15));
    assert_eq!(config.max_retry_duration, Duration::from_secs(300));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://airbyte.example.com")
        .timeout(Duration::from_secs(60))
        .backoff(
            Duration::from_millis(100),
            Duration::from_secs(5),
            Duration::from_secs(30),
        )
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, "https://airbyte.example.com");
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.initial_backoff, Duration::from_millis(100));
    assert_eq!(config.max_backoff, Duration::from_secs(5));
    assert_eq!(config.max_retry_duration, Duration::from_secs(30));
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[tokio::test]
async fn test_post_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/get"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({ "id": 123 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "job": { "id": 123, "status": "running" },
            "attempts": []
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body: serde_json::Value = client
        .post_json("/api/v1/jobs/get", serde_json::json!({ "id": 123 }))
        .await
        .unwrap();

    assert_eq!(body["job"]["id"], 123);
}

#[tokio::test]
async fn test_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/jobs/42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "jobId": 42, "status": "running" })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body: serde_json::Value = client.get_json("/v1/jobs/42").await.unwrap();
    assert_eq!(body["jobId"], 42);
}

#[tokio::test]
async fn test_non_success_maps_to_request_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/jobs/42"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_json::<serde_json::Value>("/v1/jobs/42")
        .await
        .unwrap_err();

    match err {
        Error::RequestFailed { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_conflict_with_marker_maps_to_already_running() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/connections/sync"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_string("{\"message\": \"A sync is already running.\"}"),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .post_json::<serde_json::Value>(
            "/api/v1/connections/sync",
            serde_json::json!({ "connectionId": "abc" }),
        )
        .await
        .unwrap_err();

    assert!(err.is_already_running());
}

#[tokio::test]
async fn test_conflict_without_marker_stays_request_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/jobs"))
        .respond_with(ResponseTemplate::new(409).set_body_string("some other conflict"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .post_json::<serde_json::Value>("/v1/jobs", serde_json::json!({}))
        .await
        .unwrap_err();

    match err {
        Error::RequestFailed { status, .. } => assert_eq!(status, 409),
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_408_is_retried() {
    let mock_server = MockServer::start().await;

    // First response is a 408, then the endpoint recovers
    Mock::given(method("GET"))
        .and(path("/v1/jobs/1"))
        .respond_with(ResponseTemplate::new(408))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/jobs/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "jobId": 1, "status": "running" })),
        )
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .backoff(
            Duration::from_millis(10),
            Duration::from_millis(50),
            Duration::from_secs(5),
        )
        .build();
    let client = HttpClient::with_auth(config, AuthConfig::None).unwrap();

    let body: serde_json::Value = client.get_json("/v1/jobs/1").await.unwrap();
    assert_eq!(body["jobId"], 1);
}

#[tokio::test]
async fn test_absolute_url_bypasses_base() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/absolute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new("http://unused.invalid").unwrap();
    let url = format!("{}/absolute", mock_server.uri());
    let body: serde_json::Value = client.get_json(&url).await.unwrap();
    assert_eq!(body["ok"], true);
}
