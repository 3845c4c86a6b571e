//! Event emission for run observers
//!
//! Centralized emission of harvest events over an in-process channel so the
//! CLI (or any other front end driving a run) can receive real-time updates
//! while the pipeline executes.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::domain::events::{HarvestEvent, RunId, RunSummary};

/// Event emitter for sending real-time updates to a run observer.
#[derive(Clone)]
pub struct EventEmitter {
    sender: Option<UnboundedSender<HarvestEvent>>,
}

impl EventEmitter {
    /// Creates an emitter together with the receiving end for its observer.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<HarvestEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// Creates an emitter that drops every event.
    #[must_use]
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    /// Emits one event. Delivery is fire and forget; an observer that has
    /// gone away is not an error.
    pub fn emit(&self, event: HarvestEvent) {
        let Some(sender) = &self.sender else {
            return;
        };
        let event_name = event.event_name();
        if sender.send(event).is_ok() {
            debug!("Emitted event: {}", event_name);
        } else {
            debug!("No observer for event: {}", event_name);
        }
    }

    /// Emit the run start notification.
    pub fn emit_run_started(&self, run_id: RunId, target_kind: &str) {
        self.emit(HarvestEvent::RunStarted {
            run_id,
            target_kind: target_kind.to_string(),
        });
    }

    /// Emit the listing scan result.
    pub fn emit_listing_scanned(
        &self,
        run_id: RunId,
        discovered: u64,
        admitted: u64,
        skipped_known: u64,
        duplicate_addresses: u64,
        malformed: u64,
    ) {
        self.emit(HarvestEvent::ListingScanned {
            run_id,
            discovered,
            admitted,
            skipped_known,
            duplicate_addresses,
            malformed,
        });
    }

    /// Emit an appended record notification.
    pub fn emit_record_appended(&self, run_id: RunId, registration_no: &str) {
        self.emit(HarvestEvent::RecordAppended {
            run_id,
            registration_no: registration_no.to_string(),
        });
    }

    /// Emit a per-target failure notification.
    pub fn emit_target_failed(&self, run_id: RunId, address: &str, reason: &str) {
        self.emit(HarvestEvent::TargetFailed {
            run_id,
            address: address.to_string(),
            reason: reason.to_string(),
        });
    }

    /// Emit the completion signal.
    pub fn emit_completed(&self, summary: RunSummary) {
        self.emit(HarvestEvent::RunCompleted { summary });
    }
}
