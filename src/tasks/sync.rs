//! Sync and reset tasks

use super::{job_failed, surface_failures};
use crate::api::{JobApi, SubmitOutcome};
use crate::error::{Error, Result};
use crate::metrics::{self, Metric};
use crate::models::{JobStatus, JobType};
use crate::poll::{LogCursor, PollConfig, Poller};
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

/// Result of a sync or reset task
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncOutput {
    /// Id of the created job; absent when the guard short-circuited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<i64>,
    /// Final job status, when the task waited for one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_status: Option<String>,
    /// True when a sync was already active and the guard tolerated it
    pub already_running: bool,
    /// Metrics extracted from the final snapshot
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
}

/// Submit a sync or reset job and optionally poll it to completion.
///
/// The already-running guard lives here: when submission reports an
/// active sync, `fail_on_active_sync` decides between a fatal
/// [`Error::AlreadyRunning`] and a short-circuit output with
/// `already_running` set and no polling at all.
#[derive(Debug, Clone)]
pub struct SyncTask {
    job_type: JobType,
    wait: bool,
    fail_on_active_sync: bool,
    poll: PollConfig,
}

impl SyncTask {
    /// Create a sync task with the default policy: wait for completion,
    /// fail on an active sync, 1 s cadence, 60 min deadline
    pub fn sync() -> Self {
        Self::new(JobType::Sync)
    }

    /// Create a reset task
    pub fn reset() -> Self {
        Self::new(JobType::Reset)
    }

    fn new(job_type: JobType) -> Self {
        Self {
            job_type,
            wait: true,
            fail_on_active_sync: true,
            poll: PollConfig::default(),
        }
    }

    /// Wait for the job to end (default true)
    #[must_use]
    pub fn wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    /// Treat an already-active sync as fatal (default true)
    #[must_use]
    pub fn fail_on_active_sync(mut self, fail: bool) -> Self {
        self.fail_on_active_sync = fail;
        self
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
    pub async fn run(&self, api: &dyn JobApi) -> Result<SyncOutput> {
        let submitted = match api.submit(self.job_type).await? {
            SubmitOutcome::Started(snapshot) => snapshot,
            SubmitOutcome::AlreadyRunning => {
                if self.fail_on_active_sync {
                    return Err(Error::AlreadyRunning);
                }
                warn!("A sync is already running on this connection, skipping");
                return Ok(SyncOutput {
                    job_id: None,
                    final_status: None,
                    already_running: true,
                    metrics: Vec::new(),
                });
            }
        };

        let job_id = submitted.id;

        if !self.wait {
            return Ok(SyncOutput {
                job_id: Some(job_id),
                final_status: None,
                already_running: false,
                metrics: Vec::new(),
            });
        }

        // Cursor state lives for exactly this invocation
        let mut cursor = LogCursor::new();
        let poller = Poller::new(self.poll.clone());
        let terminal = poller.wait_until_terminal(api, job_id, &mut cursor).await?;

        surface_failures(&terminal);

        if terminal.status != JobStatus::Succeeded {
            return Err(job_failed(&terminal));
        }

        let metrics = metrics::extract(&terminal);
        info!("Job {job_id} succeeded");

        Ok(SyncOutput {
            job_id: Some(job_id),
            final_status: Some(terminal.status.to_string()),
            already_running: false,
            metrics,
        })
    }
}
