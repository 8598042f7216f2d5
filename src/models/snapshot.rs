//! Shape-agnostic job view
//!
//! The poller, log cursor, and metrics extractor all work against
//! `JobSnapshot` so the same state machine drives both API variants.

use super::attempt::AttemptInfo;
use super::cloud::JobResponse;
use super::job::{JobInfo, JobStatus};
use serde::Serialize;
use std::time::Duration;

/// Job-level aggregates only the Cloud API reports
#[derive(Debug, Clone, Default, Serialize)]
pub struct CloudAggregates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_synced: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_synced: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
}

/// An immutable snapshot of a remote job, one per fetch
#[derive(Debug, Clone, Serialize)]
pub struct JobSnapshot {
    pub id: i64,
    pub status: JobStatus,
    /// Append-only, ordinal-indexed; empty for the Cloud API
    pub attempts: Vec<AttemptInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregates: Option<CloudAggregates>,
}

impl JobSnapshot {
    /// True when the job will make no further progress
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl From<JobInfo> for JobSnapshot {
    fn from(info: JobInfo) -> Self {
        Self {
            id: info.job.id,
            status: info.job.status,
            attempts: info.attempts,
            aggregates: None,
        }
    }
}

impl From<JobResponse> for JobSnapshot {
    fn from(response: JobResponse) -> Self {
        let duration = response.parsed_duration();
        Self {
            id: response.job_id,
            status: response.status,
            attempts: Vec::new(),
            aggregates: Some(CloudAggregates {
                bytes_synced: response.bytes_synced,
                rows_synced: response.rows_synced,
                duration,
            }),
        }
    }
}
