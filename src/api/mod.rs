//! Remote job clients
//!
//! One capability, two API shapes. `JobApi` is the seam the poller and
//! tasks work against: submit a job for a connection, fetch a job by id.
//! `SelfHostedApi` talks to the Config API of a self-hosted instance,
//! `CloudApi` to the hosted public API. Everything above this module is
//! API-shape-agnostic.

mod cloud;
mod self_hosted;

pub use cloud::CloudApi;
pub use self_hosted::SelfHostedApi;

use crate::error::Result;
use crate::models::{JobSnapshot, JobType};
use async_trait::async_trait;

/// Outcome of a job submission.
///
/// The conflict case is a value, not an error: whether an already-active
/// sync is fatal is the caller's policy, not the transport's.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The job was created
    Started(JobSnapshot),
    /// The instance refused because a sync is already active on the
    /// connection (self-hosted only)
    AlreadyRunning,
}

/// A remote job client for one connection on one Airbyte instance
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Start a sync or reset job on the connection
    async fn submit(&self, job_type: JobType) -> Result<SubmitOutcome>;

    /// Fetch the current snapshot of a job
    async fn fetch(&self, job_id: i64) -> Result<JobSnapshot>;
}
