//! # Run State
//!
//! Shared counters for one run. Fetch tasks update them concurrently and
//! the orchestrator folds them into the final [`RunSummary`] when the run
//! drains.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::events::{RunId, RunOutcome, RunSummary};
use crate::pipeline::dedup::FilterReport;

#[derive(Debug, Default)]
struct Counters {
    targets_discovered: u64,
    targets_admitted: u64,
    skipped_known: u64,
    duplicate_addresses: u64,
    malformed_targets: u64,
    records_appended: u64,
    failed_fetches: u64,
    failed_extracts: u64,
    failed_appends: u64,
}

/// Counters shared across the tasks of one run.
#[derive(Clone)]
pub struct RunStats {
    run_id: RunId,
    started_at: DateTime<Utc>,
    counters: Arc<RwLock<Counters>>,
}

impl RunStats {
    #[must_use]
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            counters: Arc::new(RwLock::new(Counters::default())),
        }
    }

    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Folds one listing filter outcome into the counters.
    pub async fn record_filter(&self, report: &FilterReport) {
        let mut counters = self.counters.write().await;
        counters.targets_discovered += report.discovered();
        counters.targets_admitted += report.admitted.len() as u64;
        counters.skipped_known += report.skipped_known;
        counters.duplicate_addresses += report.duplicate_addresses;
        counters.malformed_targets += report.malformed;
    }

    /// Records the one target of a detail run as admitted.
    pub async fn record_single_admitted(&self) {
        let mut counters = self.counters.write().await;
        counters.targets_discovered += 1;
        counters.targets_admitted += 1;
    }

    /// Records the one target of a detail run as already known.
    pub async fn record_single_skipped(&self) {
        let mut counters = self.counters.write().await;
        counters.targets_discovered += 1;
        counters.skipped_known += 1;
    }

    pub async fn record_appended(&self) {
        self.counters.write().await.records_appended += 1;
    }

    pub async fn record_fetch_failure(&self) {
        self.counters.write().await.failed_fetches += 1;
    }

    pub async fn record_extract_failure(&self) {
        self.counters.write().await.failed_extracts += 1;
    }

    pub async fn record_append_failure(&self) {
        self.counters.write().await.failed_appends += 1;
    }

    /// Snapshots the counters into an end-of-run summary.
    pub async fn summarize(&self, outcome: RunOutcome) -> RunSummary {
        let counters = self.counters.read().await;
        RunSummary {
            run_id: self.run_id,
            outcome,
            started_at: self.started_at,
            finished_at: Utc::now(),
            targets_discovered: counters.targets_discovered,
            targets_admitted: counters.targets_admitted,
            skipped_known: counters.skipped_known,
            duplicate_addresses: counters.duplicate_addresses,
            malformed_targets: counters.malformed_targets,
            records_appended: counters.records_appended,
            failed_fetches: counters.failed_fetches,
            failed_extracts: counters.failed_extracts,
            failed_appends: counters.failed_appends,
        }
    }
}
