//! Authenticated HTTP client with transient-failure retry

use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Body marker the Config API uses for its 409 conflict response
pub const ALREADY_RUNNING_MARKER: &str = "A sync is already running";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Initial delay for backoff on transient failures
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Total retry budget across one logical request
    pub max_retry_duration: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(10),
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(15),
            max_retry_duration: Duration::from_secs(300),
            user_agent: format!("airlift/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set backoff bounds for transient-failure retry
    pub fn backoff(mut self, initial: Duration, max: Duration, total: Duration) -> Self {
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self.config.max_retry_duration = total;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Authenticated HTTP client for one Airbyte instance
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Authenticator,
}

impl HttpClient {
    /// Create a client for a base URL with no authentication
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_auth(
            HttpClientConfig::builder().base_url(base_url).build(),
            AuthConfig::None,
        )
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let authenticator = Authenticator::with_client(auth_config, client.clone());

        Ok(Self {
            client,
            config,
            authenticator,
        })
    }

    /// POST a JSON body and parse the JSON response
    pub async fn post_json<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T> {
        self.request_json(Method::POST, path, Some(body)).await
    }

    /// GET and parse the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request_json(Method::GET, path, None).await
    }

    /// Issue one logical request, retrying transient failures, and parse
    /// the successful response body
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let response = self.request(method, path, body).await?;
        let parsed = response.json().await?;
        Ok(parsed)
    }

    /// Issue one logical request, retrying transient failures
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Response> {
        let full_url = self.build_url(path);
        let started = Instant::now();
        let mut retry = 0u32;

        loop {
            let mut req = self
                .client
                .request(method.clone(), &full_url)
                .header("Content-Type", "application/json");

            if let Some(ref body) = body {
                req = req.json(body);
            }

            req = self.authenticator.apply(req).await?;

            match req.send().await {
                Ok(response) => {
                    let status = response.status();

                    // 408 from the instance is transient; everything else
                    // resolves here.
                    if status == StatusCode::REQUEST_TIMEOUT {
                        if let Some(delay) = self.next_backoff(retry, started) {
                            warn!(
                                "Request timed out remotely (408), retrying in {:?}",
                                delay
                            );
                            tokio::time::sleep(delay).await;
                            retry += 1;
                            continue;
                        }
                    }

                    if status.is_success() {
                        debug!("Request succeeded: {} {}", method, full_url);
                        return Ok(response);
                    }

                    let body = response.text().await.unwrap_or_default();

                    if status == StatusCode::CONFLICT && body.contains(ALREADY_RUNNING_MARKER) {
                        return Err(Error::AlreadyRunning);
                    }

                    return Err(Error::RequestFailed {
                        status: status.as_u16(),
                        body,
                    });
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        if let Some(delay) = self.next_backoff(retry, started) {
                            warn!("Transport error ({e}), retrying in {:?}", delay);
                            tokio::time::sleep(delay).await;
                            retry += 1;
                            continue;
                        }
                    }
                    return Err(Error::Http(e));
                }
            }
        }
    }

    /// Exponential backoff delay for the given retry ordinal, or None
    /// once the total retry budget is spent
    fn next_backoff(&self, retry: u32, started: Instant) -> Option<Duration> {
        if started.elapsed() >= self.config.max_retry_duration {
            return None;
        }
        let factor = 2u32.saturating_pow(retry);
        let delay = self.config.initial_backoff.saturating_mul(factor);
        Some(std::cmp::min(delay, self.config.max_backoff))
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("authenticator", &self.authenticator)
            .finish_non_exhaustive()
    }
}
