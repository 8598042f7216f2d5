//! Tests for the auth module

use super::*;
use wiremock::matchers::{body_json_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_cached_token_no_expiry_never_expires() {
    let token = CachedToken::new("abc".into(), None);
    assert!(!token.is_expired());
}

#[test]
fn test_cached_token_expiry_buffer() {
    // Expires within the 30s buffer, so treated as already expired
    let token = CachedToken::expires_in("abc".into(), 10);
    assert!(token.is_expired());

    let token = CachedToken::expires_in("abc".into(), 3600);
    assert!(!token.is_expired());
}

#[tokio::test]
async fn test_apply_none_leaves_request_untouched() {
    let auth = Authenticator::new(AuthConfig::None);
    let client = reqwest::Client::new();
    let req = auth
        .apply(client.get("http://localhost/api"))
        .await
        .unwrap();
    let built = req.build().unwrap();
    assert!(built.headers().get("Authorization").is_none());
}

#[tokio::test]
async fn test_apply_bearer() {
    let auth = Authenticator::new(AuthConfig::Bearer {
        token: "secret".into(),
    });
    let client = reqwest::Client::new();
    let req = auth
        .apply(client.get("http://localhost/api"))
        .await
        .unwrap();
    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer secret"
    );
}

#[tokio::test]
async fn test_apply_basic() {
    let auth = Authenticator::new(AuthConfig::Basic {
        username: "user".into(),
        password: "pass".into(),
    });
    let client = reqwest::Client::new();
    let req = auth
        .apply(client.get("http://localhost/api"))
        .await
        .unwrap();
    let built = req.build().unwrap();
    // "user:pass" base64-encoded
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Basic dXNlcjpwYXNz"
    );
}

#[tokio::test]
async fn test_client_credentials_exchange_and_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/applications/token"))
        .and(header("Content-Type", "application/json"))
        .and(body_json_string(
            serde_json::json!({
                "client_id": "local-client",
                "client_secret": "local-secret",
                "grant-type": "client_credentials"
            })
            .to_string(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ey.mock.local",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::ClientCredentials {
        token_url: format!("{}/api/v1/applications/token", mock_server.uri()),
        client_id: "local-client".into(),
        client_secret: "local-secret".into(),
    });

    let client = reqwest::Client::new();
    // Two applications of auth must hit the token endpoint once
    for _ in 0..2 {
        let req = auth
            .apply(client.get("http://localhost/api"))
            .await
            .unwrap();
        let built = req.build().unwrap();
        assert_eq!(
            built.headers().get("Authorization").unwrap(),
            "Bearer ey.mock.local"
        );
    }
}

#[tokio::test]
async fn test_client_credentials_exchange_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::ClientCredentials {
        token_url: format!("{}/token", mock_server.uri()),
        client_id: "x".into(),
        client_secret: "y".into(),
    });

    let client = reqwest::Client::new();
    let err = auth
        .apply(client.get("http://localhost/api"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("401"));
}
