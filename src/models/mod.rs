//! Wire models for the Airbyte control plane
//!
//! Covers both API shapes: the self-hosted Config API (`JobInfo` with
//! per-attempt logs) and the Cloud public API (`JobResponse` with
//! job-level aggregates). `JobSnapshot` is the shape-agnostic view the
//! poller and metrics layers consume.

mod attempt;
mod cloud;
mod job;
mod snapshot;

pub use attempt::{
    Attempt, AttemptFailureOrigin, AttemptFailureReason, AttemptFailureSummary, AttemptFailureType,
    AttemptInfo, AttemptLog, AttemptStats, AttemptStatus, AttemptStreamStats,
};
pub use cloud::{JobCreateRequest, JobResponse, JobType};
pub use job::{Job, JobConfigType, JobInfo, JobStatus};
pub use snapshot::{CloudAggregates, JobSnapshot};
