//! Public API client for the hosted Cloud

use super::{JobApi, SubmitOutcome};
use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{JobCreateRequest, JobResponse, JobSnapshot, JobType};
use async_trait::async_trait;
use tracing::info;

/// Job client against the Cloud public API.
///
/// The Cloud API has no already-running state; a 409 from it is a plain
/// request failure and propagates as such.
#[derive(Debug)]
pub struct CloudApi {
    client: HttpClient,
    connection_id: String,
}

impl CloudApi {
    /// Create a client for one connection
    pub fn new(client: HttpClient, connection_id: impl Into<String>) -> Self {
        Self {
            client,
            connection_id: connection_id.into(),
        }
    }
}

#[async_trait]
impl JobApi for CloudApi {
    async fn submit(&self, job_type: JobType) -> Result<SubmitOutcome> {
        let request = JobCreateRequest {
            connection_id: self.connection_id.clone(),
            job_type,
        };

        let response: JobResponse = self
            .client
            .post_json("/v1/jobs", serde_json::to_value(&request)?)
            .await?;

        info!(
            "Submitted {} job {} with status {}",
            job_type, response.job_id, response.status
        );

        Ok(SubmitOutcome::Started(response.into()))
    }

    async fn fetch(&self, job_id: i64) -> Result<JobSnapshot> {
        let response: JobResponse = self.client.get_json(&format!("/v1/jobs/{job_id}")).await?;
        Ok(response.into())
    }
}
