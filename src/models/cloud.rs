//! Cloud public API shapes
//!
//! The Cloud API reports jobs as a flat `JobResponse` with job-level
//! aggregates instead of per-attempt statistics. Durations arrive as
//! ISO-8601 strings (`PT1M30S`).

use super::job::JobStatus;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The kind of job to create on the Cloud API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Sync,
    Reset,
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobType::Sync => f.write_str("sync"),
            JobType::Reset => f.write_str("reset"),
        }
    }
}

/// Body of `POST /v1/jobs`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCreateRequest {
    pub connection_id: String,
    pub job_type: JobType,
}

/// A job as reported by the Cloud API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub job_id: i64,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<String>,
    /// ISO-8601 duration, e.g. `PT2M30S`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_synced: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_synced: Option<i64>,
}

impl JobResponse {
    /// Parse the ISO-8601 duration field, if present and well-formed
    pub fn parsed_duration(&self) -> Option<Duration> {
        self.duration.as_deref().and_then(parse_iso8601_duration)
    }
}

/// Parse a subset of ISO-8601 durations: `PnDTnHnMnS` with fractional
/// seconds. Returns None on anything malformed.
pub fn parse_iso8601_duration(input: &str) -> Option<Duration> {
    let rest = input.strip_prefix('P')?;
    let (date_part, time_part) = match rest.split_once('T') {
        Some((d, t)) => (d, t),
        None => (rest, ""),
    };

    let mut secs = 0f64;

    let mut number = String::new();
    for c in date_part.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
        } else if c == 'D' {
            secs += number.parse::<f64>().ok()? * 86_400.0;
            number.clear();
        } else {
            return None;
        }
    }
    if !number.is_empty() {
        return None;
    }

    for c in time_part.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
        } else {
            let value = number.parse::<f64>().ok()?;
            number.clear();
            match c {
                'H' => secs += value * 3_600.0,
                'M' => secs += value * 60.0,
                'S' => secs += value,
                _ => return None,
            }
        }
    }
    if !number.is_empty() {
        return None;
    }

    if secs.is_finite() && secs >= 0.0 {
        Some(Duration::from_secs_f64(secs))
    } else {
        None
    }
}
