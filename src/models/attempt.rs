//! Attempt-level types for the self-hosted Config API

use serde::{Deserialize, Serialize};

/// Status of a single attempt within a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    Running,
    Failed,
    Succeeded,
}

/// Byte/record counters for an attempt or one of its streams.
///
/// Absent counters stay absent; the metrics layer must not report them
/// as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_emitted: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_emitted: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_messages_emitted: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_committed: Option<i64>,
}

/// Per-stream counters within an attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptStreamStats {
    pub stream_name: String,
    pub stats: AttemptStats,
}

/// Where a failure originated in the replication pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptFailureOrigin {
    Source,
    Destination,
    Replication,
    Persistence,
    Normalization,
    Dbt,
    AirbytePlatform,
}

/// Classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptFailureType {
    ConfigError,
    SystemError,
    ManualCancellation,
}

/// One failure reason reported for an attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptFailureReason {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_origin: Option<AttemptFailureOrigin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_type: Option<AttemptFailureType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Every failure reason collected for an attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptFailureSummary {
    #[serde(default)]
    pub failures: Vec<AttemptFailureReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_success: Option<bool>,
}

/// One execution try within a job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub id: i64,
    pub status: AttemptStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_synced: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_synced: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_stats: Option<AttemptStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_stats: Option<Vec<AttemptStreamStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_summary: Option<AttemptFailureSummary>,
}

/// The log lines produced by the remote execution engine for one attempt.
///
/// Ordered and append-only across polls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptLog {
    #[serde(default)]
    pub log_lines: Vec<String>,
}

/// An attempt paired with its log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptInfo {
    pub attempt: Attempt,
    #[serde(default)]
    pub logs: AttemptLog,
}
