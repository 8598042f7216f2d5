//! # airlift
//!
//! A Rust toolkit for orchestrating Airbyte jobs over the HTTP control
//! plane: start a sync or reset on a connection, poll the job until it
//! reaches a terminal status, stream the engine's logs incrementally,
//! and extract counters from the final snapshot.
//!
//! Works against both API shapes: the Config API of a self-hosted
//! instance and the Cloud public API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use airlift::api::SelfHostedApi;
//! use airlift::http::HttpClient;
//! use airlift::tasks::SyncTask;
//!
//! #[tokio::main]
//! async fn main() -> airlift::Result<()> {
//!     let client = HttpClient::new("http://localhost:8000")?;
//!     let api = SelfHostedApi::new(client, "e3b1ce92-547c-436f-b1e8-23b6936c12cd");
//!
//!     let output = SyncTask::sync().run(&api).await?;
//!     println!("job {:?} ended {:?}", output.job_id, output.final_status);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Tasks                              │
//! │   SyncTask (sync/reset + already-running guard)             │
//! │   CheckStatusTask (watch an existing job)                   │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────────┬──────────────┐
//! │    Poll      │             Api               │   Metrics    │
//! ├──────────────┼───────────────────────────────┼──────────────┤
//! │ Poller       │ JobApi trait                  │ attempts     │
//! │ LogCursor    │  SelfHostedApi (Config API)   │ per-stream   │
//! │ severity     │  CloudApi (public API)        │ aggregates   │
//! └──────────────┴───────────────┬───────────────┴──────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  │     Http + Auth           │
//!                  │ retry/backoff, 409 guard  │
//!                  │ bearer/basic/client creds │
//!                  └───────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Wire models for both API shapes
pub mod models;

/// Authentication implementations
pub mod auth;

/// Authenticated HTTP client with transient-failure retry
pub mod http;

/// Remote job clients (self-hosted and Cloud)
pub mod api;

/// Poll-until-terminal state machine and log cursor
pub mod poll;

/// Metric extraction from terminal snapshots
pub mod metrics;

/// Caller-facing sync/reset/status tasks
pub mod tasks;

/// Task definition files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
