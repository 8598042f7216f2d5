//! Job-level types for the self-hosted Config API

use super::attempt::AttemptInfo;
use serde::{Deserialize, Serialize};

/// Status of a job on the remote instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Incomplete,
    Failed,
    Succeeded,
    Cancelled,
}

impl JobStatus {
    /// True when the job will make no further progress.
    ///
    /// `incomplete` is terminal at the job level: the remote instance has
    /// exhausted its attempt auto-retries.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Incomplete | JobStatus::Failed | JobStatus::Cancelled | JobStatus::Succeeded
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Incomplete => "incomplete",
            JobStatus::Failed => "failed",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// What kind of work a job performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobConfigType {
    CheckConnectionSource,
    CheckConnectionDestination,
    DiscoverSchema,
    GetSpec,
    Sync,
    ResetConnection,
}

/// One execution of a connection, as reported by the Config API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_type: Option<JobConfigType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_id: Option<String>,
    /// Creation time, epoch seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Last update time, epoch seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    pub status: JobStatus,
}

/// A job plus every attempt seen so far, ordinal-indexed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobInfo {
    pub job: Job,
    #[serde(default)]
    pub attempts: Vec<AttemptInfo>,
}
