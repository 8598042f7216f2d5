//! Poll-until-terminal state machine
//!
//! After submission a job is polled at a fixed cadence until it reaches
//! a job-level terminal status, bounded by an overall deadline. Every
//! iteration drains the log cursor before evaluating the exit condition
//! so logs from the final snapshot are still surfaced.

mod cursor;

pub use cursor::{classify_line, EmittedLine, LogCursor, LogLevel};

use crate::api::JobApi;
use crate::error::{Error, Result};
use crate::models::{JobSnapshot, JobStatus};
use std::time::{Duration, Instant};
use tracing::warn;

/// Cadence and deadline for one poll loop
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Fixed delay between status fetches
    pub interval: Duration,
    /// Overall deadline for reaching a terminal status
    pub max_wait: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_wait: Duration::from_secs(60 * 60),
        }
    }
}

/// Drives one job to a terminal status
#[derive(Debug, Clone, Default)]
pub struct Poller {
    config: PollConfig,
}

impl Poller {
    /// Create a poller with the given cadence and deadline
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    /// Poll the job until its status is terminal for this operation.
    ///
    /// `terminal` decides which job statuses end the loop; sync-style
    /// operations use [`JobStatus::is_terminal`], a standalone status
    /// check excludes `incomplete` and keeps waiting for the auto-retry.
    ///
    /// The cursor is drained on every fetched snapshot, including the
    /// final one. Attempt growth past the counter (seeded at 1 for the
    /// auto-created first attempt) is reported as a warning and nothing
    /// else; it never changes the exit condition.
    pub async fn wait_until(
        &self,
        api: &dyn JobApi,
        job_id: i64,
        cursor: &mut LogCursor,
        terminal: impl Fn(JobStatus) -> bool,
    ) -> Result<JobSnapshot> {
        let started = Instant::now();
        let mut attempt_counter: usize = 1;

        loop {
            let snapshot = api.fetch(job_id).await?;
            cursor.drain(&snapshot.attempts);

            if terminal(snapshot.status) {
                return Ok(snapshot);
            }

            if snapshot.attempts.len() > attempt_counter {
                warn!("Previous attempt failed, new attempt started");
                attempt_counter += 1;
            }

            let waited = started.elapsed();
            if waited >= self.config.max_wait {
                return Err(Error::Timeout { waited });
            }

            tokio::time::sleep(self.config.interval).await;
        }
    }

    /// Poll until a job-level terminal status
    pub async fn wait_until_terminal(
        &self,
        api: &dyn JobApi,
        job_id: i64,
        cursor: &mut LogCursor,
    ) -> Result<JobSnapshot> {
        self.wait_until(api, job_id, cursor, JobStatus::is_terminal)
            .await
    }
}
