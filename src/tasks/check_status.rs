//! Standalone status check for an existing job

use super::{job_failed, surface_failures};
use crate::api::JobApi;
use crate::error::Result;
use crate::metrics::{self, Metric};
use crate::models::JobStatus;
use crate::poll::{LogCursor, PollConfig, Poller};
use serde::Serialize;
use std::time::Duration;

/// Result of a status check task
#[derive(Debug, Clone, Serialize)]
pub struct CheckStatusOutput {
    /// The job that was watched
    pub job_id: i64,
    /// Final job status
    pub final_status: String,
    /// Metrics extracted from the final snapshot
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
}

/// Poll an already-submitted job until it ends.
///
/// Unlike the sync task, `incomplete` is not terminal here: a job the
/// instance is still auto-retrying keeps being watched until it
/// resolves one way or the other.
#[derive(Debug, Clone)]
pub struct CheckStatusTask {
    job_id: i64,
    poll: PollConfig,
}

impl CheckStatusTask {
    /// Create a status check for a job id
    pub fn new(job_id: i64) -> Self {
        Self {
            job_id,
            poll: PollConfig::default(),
        }
    }

    /// Delay between status fetches (default 1 s)
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll.interval = interval;
        self
    }

    /// Overall deadline for reaching a terminal status (default 60 min)
    #[must_use]
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.poll.max_wait = max_wait;
        self
    }

    /// Run the task against a remote job client
    pub async fn run(&self, api: &dyn JobApi) -> Result<CheckStatusOutput> {
        let mut cursor = LogCursor::new();
        let poller = Poller::new(self.poll.clone());

        let terminal = poller
            .wait_until(api, self.job_id, &mut cursor, |status| {
                matches!(
                    status,
                    JobStatus::Failed | JobStatus::Cancelled | JobStatus::Succeeded
                )
            })
            .await?;

        surface_failures(&terminal);

        if terminal.status != JobStatus::Succeeded {
            return Err(job_failed(&terminal));
        }

        let metrics = metrics::extract(&terminal);

        Ok(CheckStatusOutput {
            job_id: self.job_id,
            final_status: terminal.status.to_string(),
            metrics,
        })
    }
}
