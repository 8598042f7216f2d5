//! Task definition files
//!
//! A task file describes one Airbyte instance plus the run policy for a
//! sync/reset/status task, so invocations are repeatable without long
//! flag lists. Loaded from YAML and validated before use.

use crate::auth::{AuthConfig, DEFAULT_CLOUD_TOKEN_URL};
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::poll::PollConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Credential material for one instance.
///
/// Exactly one of the three credential kinds may be set; an empty
/// section means unauthenticated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    /// Bearer token / API key
    pub token: Option<String>,
    /// Basic auth username
    pub username: Option<String>,
    /// Basic auth password
    pub password: Option<String>,
    /// Application client ID
    pub client_id: Option<String>,
    /// Application client secret
    pub client_secret: Option<String>,
    /// Token endpoint for the client credentials exchange
    pub token_url: Option<String>,
}

/// One task definition, as loaded from YAML
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskFile {
    /// Base URL of the Airbyte instance
    pub url: String,
    /// Target the Cloud public API instead of the Config API
    #[serde(default)]
    pub cloud: bool,
    /// Credential material
    #[serde(default)]
    pub auth: AuthSection,
    /// HTTP request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
    /// Connection to sync or reset
    pub connection_id: Option<String>,
    /// Existing job to watch (status task)
    pub job_id: Option<i64>,
    /// Wait for the job to end
    #[serde(default = "default_true")]
    pub wait: bool,
    /// Seconds between status fetches
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Overall deadline in seconds
    #[serde(default = "default_max_wait")]
    pub max_wait_secs: u64,
    /// Treat an already-active sync as fatal
    #[serde(default = "default_true")]
    pub fail_on_active_sync: bool,
}

fn default_true() -> bool {
    true
}

fn default_http_timeout() -> u64 {
    10
}

fn default_poll_interval() -> u64 {
    1
}

fn default_max_wait() -> u64 {
    3600
}

impl TaskFile {
    /// Load a task file from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read task file '{}': {e}", path.display()))
        })?;
        Self::from_yaml(&content)
    }

    /// Load a task file from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let task: TaskFile = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse task YAML: {e}")))?;
        task.validate()?;
        Ok(task)
    }

    /// Validate the definition
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(Error::missing_field("url"));
        }

        let auth = &self.auth;
        if auth.username.is_some() != auth.password.is_some() {
            return Err(Error::config(
                "Basic auth needs both username and password",
            ));
        }
        if auth.client_id.is_some() != auth.client_secret.is_some() {
            return Err(Error::config(
                "Client credentials need both client_id and client_secret",
            ));
        }

        let kinds = [
            auth.token.is_some(),
            auth.username.is_some(),
            auth.client_id.is_some(),
        ];
        if kinds.iter().filter(|set| **set).count() > 1 {
            return Err(Error::config(
                "Configure only one of token, username/password, or client credentials",
            ));
        }

        Ok(())
    }

    /// Resolve the credential material into an auth config.
    ///
    /// Client credentials default their token endpoint to the Cloud
    /// token URL, or to the instance's own applications/token endpoint
    /// for self-hosted.
    pub fn auth_config(&self) -> AuthConfig {
        let auth = &self.auth;

        if let Some(token) = &auth.token {
            return AuthConfig::Bearer {
                token: token.clone(),
            };
        }

        if let (Some(username), Some(password)) = (&auth.username, &auth.password) {
            return AuthConfig::Basic {
                username: username.clone(),
                password: password.clone(),
            };
        }

        if let (Some(client_id), Some(client_secret)) = (&auth.client_id, &auth.client_secret) {
            let token_url = auth.token_url.clone().unwrap_or_else(|| {
                if self.cloud {
                    DEFAULT_CLOUD_TOKEN_URL.to_string()
                } else {
                    format!(
                        "{}/api/v1/applications/token",
                        self.url.trim_end_matches('/')
                    )
                }
            });
            return AuthConfig::ClientCredentials {
                token_url,
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            };
        }

        AuthConfig::None
    }

    /// HTTP client config for this instance
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .base_url(self.url.clone())
            .timeout(Duration::from_secs(self.http_timeout_secs))
            .build()
    }

    /// Poll cadence and deadline for this task
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_secs(self.poll_interval_secs),
            max_wait: Duration::from_secs(self.max_wait_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_task_file() {
        let task = TaskFile::from_yaml(
            r"
url: http://localhost:8000
connection_id: e3b1ce92-547c-436f-b1e8-23b6936c12cd
",
        )
        .unwrap();

        assert_eq!(task.url, "http://localhost:8000");
        assert!(!task.cloud);
        assert!(task.wait);
        assert!(task.fail_on_active_sync);
        assert_eq!(task.poll_interval_secs, 1);
        assert_eq!(task.max_wait_secs, 3600);
        assert!(matches!(task.auth_config(), AuthConfig::None));
    }

    #[test]
    fn test_full_task_file() {
        let task = TaskFile::from_yaml(
            r"
url: https://api.airbyte.com
cloud: true
auth:
  token: my-api-key
http_timeout_secs: 30
connection_id: abc
wait: false
poll_interval_secs: 5
max_wait_secs: 600
fail_on_active_sync: false
",
        )
        .unwrap();

        assert!(task.cloud);
        assert!(!task.wait);
        assert!(!task.fail_on_active_sync);
        assert_eq!(task.poll_config().interval, Duration::from_secs(5));
        assert_eq!(task.poll_config().max_wait, Duration::from_secs(600));
        assert_eq!(task.http_config().timeout, Duration::from_secs(30));
        assert!(matches!(task.auth_config(), AuthConfig::Bearer { .. }));
    }

    #[test]
    fn test_client_credentials_token_url_defaults() {
        let self_hosted = TaskFile::from_yaml(
            r"
url: http://localhost:8000/
auth:
  client_id: id
  client_secret: secret
",
        )
        .unwrap();
        match self_hosted.auth_config() {
            AuthConfig::ClientCredentials { token_url, .. } => {
                assert_eq!(token_url, "http://localhost:8000/api/v1/applications/token");
            }
            other => panic!("expected client credentials, got {other:?}"),
        }

        let cloud = TaskFile::from_yaml(
            r"
url: https://api.airbyte.com
cloud: true
auth:
  client_id: id
  client_secret: secret
",
        )
        .unwrap();
        match cloud.auth_config() {
            AuthConfig::ClientCredentials { token_url, .. } => {
                assert_eq!(token_url, DEFAULT_CLOUD_TOKEN_URL);
            }
            other => panic!("expected client credentials, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_errors() {
        let err = TaskFile::from_yaml("url: ''").unwrap_err();
        assert!(err.to_string().contains("url"));

        let err = TaskFile::from_yaml(
            r"
url: http://localhost:8000
auth:
  username: user
",
        )
        .unwrap_err();
        assert!(err.to_string().contains("username and password"));

        let err = TaskFile::from_yaml(
            r"
url: http://localhost:8000
auth:
  token: t
  username: u
  password: p
",
        )
        .unwrap_err();
        assert!(err.to_string().contains("only one"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = TaskFile::from_yaml(
            r"
url: http://localhost:8000
no_such_field: true
",
        )
        .unwrap_err();
        assert!(err.to_string().contains("no_such_field"));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("task.yaml");
        std::fs::write(&path, "url: http://localhost:8000\nconnection_id: abc\n").unwrap();

        let task = TaskFile::from_path(&path).unwrap();
        assert_eq!(task.connection_id.as_deref(), Some("abc"));

        let err = TaskFile::from_path(dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read task file"));
    }
}
