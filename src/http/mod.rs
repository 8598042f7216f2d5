//! HTTP layer
//!
//! A thin authenticated client over `reqwest`: base-URL joining, default
//! timeout, transient-failure retry with exponential backoff, and
//! response classification into the crate's error kinds. The poll loop's
//! fixed cadence is a separate concern and lives in `crate::poll`.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, ALREADY_RUNNING_MARKER};

#[cfg(test)]
mod tests;
