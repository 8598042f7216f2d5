//! Caller-facing operations
//!
//! A task owns the policy around one submit-and-poll invocation: whether
//! to wait, how long, and whether an already-active sync is fatal. Tasks
//! are API-shape-agnostic; hand them any [`crate::api::JobApi`].

mod check_status;
mod sync;

pub use check_status::{CheckStatusOutput, CheckStatusTask};
pub use sync::{SyncOutput, SyncTask};

use crate::error::Error;
use crate::models::JobSnapshot;
use tracing::warn;

/// Emit one warning per failure reason reported across all attempts
fn surface_failures(snapshot: &JobSnapshot) {
    for info in &snapshot.attempts {
        let Some(summary) = &info.attempt.failure_summary else {
            continue;
        };
        for reason in &summary.failures {
            let detail = serde_json::to_string(reason).unwrap_or_else(|_| format!("{reason:?}"));
            warn!("Failure with reason {detail}");
        }
    }
}

/// Build the fatal error for a terminal non-succeeded job
fn job_failed(snapshot: &JobSnapshot) -> Error {
    let detail = serde_json::to_string(snapshot).unwrap_or_else(|_| format!("{snapshot:?}"));
    Error::JobFailed {
        status: snapshot.status.to_string(),
        attempts: snapshot.attempts.len(),
        detail,
    }
}
