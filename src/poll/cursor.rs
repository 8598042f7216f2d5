//! Incremental log surfacing
//!
//! The remote engine appends log lines to each attempt while a job runs.
//! `LogCursor` remembers how many lines per attempt have already been
//! surfaced and emits only the new ones, so a poll loop can stream logs
//! without duplication.

use crate::models::AttemptInfo;
use std::collections::HashMap;
use tracing::{debug, error, info, trace, warn};

/// Severity parsed out of an engine log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Debug,
    Trace,
    Info,
}

/// One log line surfaced by the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedLine {
    /// Ordinal of the attempt the line belongs to
    pub attempt: usize,
    /// Parsed severity
    pub level: LogLevel,
    /// The raw line text
    pub line: String,
}

/// Classify a line by the bracketed severity marker embedded in it
pub fn classify_line(line: &str) -> LogLevel {
    if line.contains("ERROR[") {
        LogLevel::Error
    } else if line.contains("WARN[") {
        LogLevel::Warn
    } else if line.contains("DEBUG[") {
        LogLevel::Debug
    } else if line.contains("TRACE[") {
        LogLevel::Trace
    } else {
        LogLevel::Info
    }
}

/// Per-attempt bookkeeping of already-surfaced log lines.
///
/// Owned by a single submit-and-poll invocation; never shared across
/// invocations. Counts are non-decreasing, attempts are append-only and
/// ordinal-indexed, so the cursor never re-emits and never skips a line.
#[derive(Debug, Default)]
pub struct LogCursor {
    emitted: HashMap<usize, usize>,
}

impl LogCursor {
    /// Create a fresh cursor with no lines emitted
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface every not-yet-emitted line of every attempt, routing each
    /// to the `tracing` level matching its severity marker, and return
    /// them in emission order.
    pub fn drain(&mut self, attempts: &[AttemptInfo]) -> Vec<EmittedLine> {
        let mut out = Vec::new();

        for (index, attempt) in attempts.iter().enumerate() {
            let lines = &attempt.logs.log_lines;
            let already = self.emitted.get(&index).copied().unwrap_or(0);
            if lines.len() <= already {
                continue;
            }

            for line in &lines[already..] {
                let level = classify_line(line);
                match level {
                    LogLevel::Error => error!("{line}"),
                    LogLevel::Warn => warn!("{line}"),
                    LogLevel::Debug => debug!("{line}"),
                    LogLevel::Trace => trace!("{line}"),
                    LogLevel::Info => info!("{line}"),
                }
                out.push(EmittedLine {
                    attempt: index,
                    level,
                    line: line.clone(),
                });
            }

            self.emitted.insert(index, lines.len());
        }

        out
    }

    /// How many lines have been emitted for an attempt ordinal
    pub fn emitted_for(&self, attempt: usize) -> usize {
        self.emitted.get(&attempt).copied().unwrap_or(0)
    }
}
