//! # Harvest Events
//!
//! Progress events emitted while a run executes, consumed by whatever front
//! end drove the run. The final [`RunCompleted`](HarvestEvent::RunCompleted)
//! event is the completion signal and carries the full [`RunSummary`],
//! including per-kind failure counts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Creates a new unique run ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID.
    #[must_use]
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The fetch/append phase drained normally.
    Completed,
    /// The request had no quadrant or block; nothing was dispatched.
    NotIssued,
}

/// End-of-run accounting, carried by the completion signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub outcome: RunOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Candidate targets seen before filtering (child links on the listing
    /// path, one on the detail path).
    pub targets_discovered: u64,
    /// Targets that survived deduplication and were fetched.
    pub targets_admitted: u64,
    /// Targets dropped because their key was already stored.
    pub skipped_known: u64,
    /// Literal duplicate addresses dropped within the batch.
    pub duplicate_addresses: u64,
    /// Addresses that did not decode to the six well fields.
    pub malformed_targets: u64,
    pub records_appended: u64,
    pub failed_fetches: u64,
    pub failed_extracts: u64,
    pub failed_appends: u64,
}

impl RunSummary {
    /// Total failures across all per-target kinds.
    #[must_use]
    pub fn failure_count(&self) -> u64 {
        self.malformed_targets + self.failed_fetches + self.failed_extracts + self.failed_appends
    }

    /// Wall-clock duration of the run.
    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Progress events emitted while a run executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarvestEvent {
    /// A run was accepted and dispatch is starting.
    RunStarted {
        run_id: RunId,
        target_kind: String,
    },

    /// The listing page was fetched and its child links filtered.
    ListingScanned {
        run_id: RunId,
        discovered: u64,
        admitted: u64,
        skipped_known: u64,
        duplicate_addresses: u64,
        malformed: u64,
    },

    /// One record was appended to the store.
    RecordAppended {
        run_id: RunId,
        registration_no: String,
    },

    /// One target produced no record.
    TargetFailed {
        run_id: RunId,
        address: String,
        reason: String,
    },

    /// The completion signal; always the last event of a run.
    RunCompleted { summary: RunSummary },
}

impl HarvestEvent {
    /// Returns the event type as a string for logs.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "run_started",
            Self::ListingScanned { .. } => "listing_scanned",
            Self::RecordAppended { .. } => "record_appended",
            Self::TargetFailed { .. } => "target_failed",
            Self::RunCompleted { .. } => "run_completed",
        }
    }
}
