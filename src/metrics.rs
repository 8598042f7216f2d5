//! Metric extraction from terminal job snapshots
//!
//! Pure data-out: the extractor turns the final snapshot into a list of
//! metric values for the caller to publish wherever it wants. It runs
//! once, after a succeeded terminal status.

use crate::models::JobSnapshot;
use serde::Serialize;
use std::time::Duration;

/// One extracted metric value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Metric {
    /// Monotonic counter
    Counter {
        name: String,
        value: i64,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        tags: Vec<(String, String)>,
    },
    /// Duration measurement
    Timer { name: String, duration: Duration },
}

impl Metric {
    fn counter(name: &str, value: i64) -> Self {
        Metric::Counter {
            name: name.to_string(),
            value,
            tags: Vec::new(),
        }
    }

    fn stream_counter(name: &str, value: i64, stream: &str) -> Self {
        Metric::Counter {
            name: name.to_string(),
            value,
            tags: vec![("stream".to_string(), stream.to_string())],
        }
    }
}

/// Extract the metrics of a terminal snapshot.
///
/// Cloud snapshots carry job-level aggregates and no attempts, so they
/// produce top-level counters and a duration timer. Self-hosted
/// snapshots produce an attempt count plus per-stream counters; a
/// counter is only emitted when the underlying value is present, an
/// absent value is never reported as zero.
pub fn extract(snapshot: &JobSnapshot) -> Vec<Metric> {
    if let Some(aggregates) = &snapshot.aggregates {
        let mut out = Vec::new();
        if let Some(bytes) = aggregates.bytes_synced {
            out.push(Metric::counter("bytes_synced", bytes));
        }
        if let Some(rows) = aggregates.rows_synced {
            out.push(Metric::counter("rows_synced", rows));
        }
        if let Some(duration) = aggregates.duration {
            out.push(Metric::Timer {
                name: "duration".to_string(),
                duration,
            });
        }
        return out;
    }

    let mut out = vec![Metric::counter(
        "attempts.count",
        snapshot.attempts.len() as i64,
    )];

    for info in &snapshot.attempts {
        let Some(stream_stats) = &info.attempt.stream_stats else {
            continue;
        };
        for stream in stream_stats {
            let name = &stream.stream_name;
            if let Some(value) = stream.stats.records_committed {
                out.push(Metric::stream_counter("records.committed", value, name));
            }
            if let Some(value) = stream.stats.records_emitted {
                out.push(Metric::stream_counter("records.emitted", value, name));
            }
            if let Some(value) = stream.stats.bytes_emitted {
                out.push(Metric::stream_counter("bytes.emitted", value, name));
            }
            if let Some(value) = stream.stats.state_messages_emitted {
                out.push(Metric::stream_counter("state.emitted", value, name));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Attempt, AttemptInfo, AttemptLog, AttemptStats, AttemptStatus, AttemptStreamStats,
        CloudAggregates, JobStatus,
    };
    use pretty_assertions::assert_eq;

    fn attempt_with_streams(streams: Vec<AttemptStreamStats>) -> AttemptInfo {
        AttemptInfo {
            attempt: Attempt {
                id: 0,
                status: AttemptStatus::Succeeded,
                created_at: None,
                updated_at: None,
                ended_at: None,
                bytes_synced: None,
                records_synced: None,
                total_stats: None,
                stream_stats: Some(streams),
                failure_summary: None,
            },
            logs: AttemptLog::default(),
        }
    }

    fn stream(name: &str, committed: Option<i64>, bytes: Option<i64>) -> AttemptStreamStats {
        AttemptStreamStats {
            stream_name: name.into(),
            stats: AttemptStats {
                records_emitted: None,
                bytes_emitted: bytes,
                state_messages_emitted: None,
                records_committed: committed,
            },
        }
    }

    #[test]
    fn test_absent_stats_are_not_reported() {
        // Two attempts, one stream each, only committed + bytes present
        let snapshot = JobSnapshot {
            id: 1,
            status: JobStatus::Succeeded,
            attempts: vec![
                attempt_with_streams(vec![stream("users", Some(10), Some(1000))]),
                attempt_with_streams(vec![stream("users", Some(10), Some(1000))]),
            ],
            aggregates: None,
        };

        let metrics = extract(&snapshot);

        assert_eq!(metrics[0], Metric::counter("attempts.count", 2));

        let committed: Vec<_> = metrics
            .iter()
            .filter(|m| matches!(m, Metric::Counter { name, .. } if name == "records.committed"))
            .collect();
        let bytes: Vec<_> = metrics
            .iter()
            .filter(|m| matches!(m, Metric::Counter { name, .. } if name == "bytes.emitted"))
            .collect();
        assert_eq!(committed.len(), 2);
        assert_eq!(bytes.len(), 2);
        assert_eq!(
            *committed[0],
            Metric::stream_counter("records.committed", 10, "users")
        );
        assert_eq!(
            *bytes[0],
            Metric::stream_counter("bytes.emitted", 1000, "users")
        );

        // Absent values produce nothing at all
        assert!(!metrics
            .iter()
            .any(|m| matches!(m, Metric::Counter { name, .. } if name == "records.emitted")));
        assert!(!metrics
            .iter()
            .any(|m| matches!(m, Metric::Counter { name, .. } if name == "state.emitted")));
    }

    #[test]
    fn test_attempt_without_stream_stats_is_skipped() {
        let mut bare = attempt_with_streams(vec![]);
        bare.attempt.stream_stats = None;

        let snapshot = JobSnapshot {
            id: 1,
            status: JobStatus::Succeeded,
            attempts: vec![bare],
            aggregates: None,
        };

        let metrics = extract(&snapshot);
        assert_eq!(metrics, vec![Metric::counter("attempts.count", 1)]);
    }

    #[test]
    fn test_cloud_aggregates_take_precedence() {
        let snapshot = JobSnapshot {
            id: 1,
            status: JobStatus::Succeeded,
            attempts: vec![],
            aggregates: Some(CloudAggregates {
                bytes_synced: Some(2048),
                rows_synced: Some(100),
                duration: Some(Duration::from_secs(90)),
            }),
        };

        let metrics = extract(&snapshot);
        assert_eq!(
            metrics,
            vec![
                Metric::counter("bytes_synced", 2048),
                Metric::counter("rows_synced", 100),
                Metric::Timer {
                    name: "duration".into(),
                    duration: Duration::from_secs(90),
                },
            ]
        );
    }

    #[test]
    fn test_cloud_partial_aggregates() {
        let snapshot = JobSnapshot {
            id: 1,
            status: JobStatus::Succeeded,
            attempts: vec![],
            aggregates: Some(CloudAggregates {
                bytes_synced: None,
                rows_synced: Some(5),
                duration: None,
            }),
        };

        let metrics = extract(&snapshot);
        assert_eq!(metrics, vec![Metric::counter("rows_synced", 5)]);
    }
}
