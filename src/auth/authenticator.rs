//! Authenticator implementation
//!
//! Handles applying authentication to requests and exchanging
//! application credentials for access tokens.

use super::types::{AuthConfig, CachedToken};
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shape of the token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached token for the client credentials flow
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),

            AuthConfig::Basic { username, password } => {
                Ok(req.basic_auth(username, Some(password)))
            }

            AuthConfig::ClientCredentials { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        // Check if we have a valid cached token
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        // Need to refresh - acquire write lock
        let mut cached = self.cached_token.write().await;

        // Double-check after acquiring write lock (another task might have refreshed)
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.exchange_client_credentials().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Exchange client id/secret for an access token
    async fn exchange_client_credentials(&self) -> Result<CachedToken> {
        let AuthConfig::ClientCredentials {
            token_url,
            client_id,
            client_secret,
        } = &self.config
        else {
            return Err(Error::auth("Not configured for client credentials"));
        };

        // The applications/token endpoint takes a JSON body, not form data,
        // and spells the grant field with a dash.
        let body = serde_json::json!({
            "client_id": client_id,
            "client_secret": client_secret,
            "grant-type": "client_credentials",
        });

        let response = self
            .http_client
            .post(token_url)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenExchange {
                message: format!("token endpoint returned {}: {body}", status.as_u16()),
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| Error::TokenExchange {
            message: format!("invalid token response: {e}"),
        })?;

        Ok(match token.expires_in {
            Some(seconds) => CachedToken::expires_in(token.access_token, seconds),
            None => CachedToken::new(token.access_token, None),
        })
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("config", &auth_kind(&self.config))
            .finish_non_exhaustive()
    }
}

fn auth_kind(config: &AuthConfig) -> &'static str {
    match config {
        AuthConfig::None => "none",
        AuthConfig::Bearer { .. } => "bearer",
        AuthConfig::Basic { .. } => "basic",
        AuthConfig::ClientCredentials { .. } => "client_credentials",
    }
}
