//! Evaluation counters
//!
//! Counters only, monotonic, reset on process start. Thread-safe via relaxed
//! atomics; exactness per counter is kept, ordering between counters is not.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::schema::ResultRecord;

/// Registry of evaluation counters.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Completed evaluation calls
    evaluations_run: AtomicU64,
    /// Accepted leaf fields across all evaluations
    fields_parsed: AtomicU64,
    /// Rejected fields across all evaluations
    fields_rejected: AtomicU64,
}

impl MetricsRegistry {
    /// Creates a registry with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies one completed evaluation.
    ///
    /// Leaf outcomes are counted recursively, so nested records contribute
    /// each of their fields exactly once.
    pub fn observe(&self, results: &ResultRecord) {
        self.evaluations_run.fetch_add(1, Ordering::Relaxed);
        self.fields_parsed
            .fetch_add(results.count_parsed() as u64, Ordering::Relaxed);
        self.fields_rejected
            .fetch_add(results.count_rejected() as u64, Ordering::Relaxed);
    }

    /// Completed evaluation calls.
    pub fn evaluations_run(&self) -> u64 {
        self.evaluations_run.load(Ordering::Relaxed)
    }

    /// Accepted leaf fields across all evaluations.
    pub fn fields_parsed(&self) -> u64 {
        self.fields_parsed.load(Ordering::Relaxed)
    }

    /// Rejected fields across all evaluations.
    pub fn fields_rejected(&self) -> u64 {
        self.fields_rejected.load(Ordering::Relaxed)
    }

    /// Returns a point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            evaluations_run: self.evaluations_run(),
            fields_parsed: self.fields_parsed(),
            fields_rejected: self.fields_rejected(),
        }
    }
}

/// Point-in-time copy of the registry's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Completed evaluation calls
    pub evaluations_run: u64,
    /// Accepted leaf fields across all evaluations
    pub fields_parsed: u64,
    /// Rejected fields across all evaluations
    pub fields_rejected: u64,
}
