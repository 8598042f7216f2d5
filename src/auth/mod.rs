//! Authentication module
//!
//! Supports the credential kinds the Airbyte control plane accepts:
//! Bearer token, Basic auth, and application client credentials
//! exchanged for a short-lived access token.
//!
//! The `Authenticator` applies auth to outgoing requests and caches
//! exchanged tokens until they expire.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken, DEFAULT_CLOUD_TOKEN_URL};

#[cfg(test)]
mod tests;
