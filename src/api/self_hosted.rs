//! Config API client for self-hosted instances

use super::{JobApi, SubmitOutcome};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::models::{JobInfo, JobSnapshot, JobType};
use async_trait::async_trait;
use tracing::info;

/// Job client against the self-hosted Config API.
///
/// Submission goes through the connection endpoints, status through
/// `POST /api/v1/jobs/get`, which also carries per-attempt logs.
#[derive(Debug)]
pub struct SelfHostedApi {
    client: HttpClient,
    connection_id: String,
}

impl SelfHostedApi {
    /// Create a client for one connection
    pub fn new(client: HttpClient, connection_id: impl Into<String>) -> Self {
        Self {
            client,
            connection_id: connection_id.into(),
        }
    }

    fn submit_path(job_type: JobType) -> &'static str {
        match job_type {
            JobType::Sync => "/api/v1/connections/sync",
            JobType::Reset => "/api/v1/connections/reset",
        }
    }
}

#[async_trait]
impl JobApi for SelfHostedApi {
    async fn submit(&self, job_type: JobType) -> Result<SubmitOutcome> {
        let body = serde_json::json!({ "connectionId": self.connection_id });

        let info: JobInfo = match self
            .client
            .post_json(Self::submit_path(job_type), body)
            .await
        {
            Ok(info) => info,
            Err(Error::AlreadyRunning) => return Ok(SubmitOutcome::AlreadyRunning),
            Err(e) => return Err(e),
        };

        info!(
            "Submitted {} job {} with status {}",
            job_type, info.job.id, info.job.status
        );

        Ok(SubmitOutcome::Started(info.into()))
    }

    async fn fetch(&self, job_id: i64) -> Result<JobSnapshot> {
        let body = serde_json::json!({ "id": job_id });
        let info: JobInfo = self.client.post_json("/api/v1/jobs/get", body).await?;
        Ok(info.into())
    }
}
