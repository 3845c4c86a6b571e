//! Application use cases for harvest runs
//!
//! Wires one run request through planning and into the pipeline: the
//! request is planned into a target (or found empty), the store is opened,
//! and the pipeline executes to a summary. The completion signal is emitted
//! on every path, including the not-issued one.

use std::sync::Arc;

use tracing::warn;

use crate::application::events::EventEmitter;
use crate::domain::events::{RunId, RunOutcome, RunSummary};
use crate::domain::request::RunRequest;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::page_fetcher::{HttpPageFetcher, PageFetcher};
use crate::infrastructure::store::CsvWellStore;
use crate::pipeline::orchestrator::{HarvestError, IngestPipeline};
use crate::pipeline::state::RunStats;

/// Use cases for driving harvest runs.
pub struct HarvestUseCases {
    config: AppConfig,
    events: EventEmitter,
}

impl HarvestUseCases {
    pub fn new(config: AppConfig, events: EventEmitter) -> Self {
        Self { config, events }
    }

    /// Plans and executes one run over the real portal fetcher.
    pub async fn run(&self, request: RunRequest) -> Result<RunSummary, HarvestError> {
        let fetcher = Arc::new(HttpPageFetcher::new(&self.config.http)?);
        self.run_with_fetcher(request, fetcher).await
    }

    /// Plans and executes one run over the given fetcher. An empty request
    /// resolves to a not-issued summary without touching the network or the
    /// store.
    pub async fn run_with_fetcher(
        &self,
        request: RunRequest,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Result<RunSummary, HarvestError> {
        let Some(target) = request.plan()? else {
            warn!("No quadrant or block requested; nothing to harvest");
            let summary = RunStats::new(RunId::new())
                .summarize(RunOutcome::NotIssued)
                .await;
            self.events.emit_completed(summary.clone());
            return Ok(summary);
        };

        let store = Arc::new(CsvWellStore::open(&self.config.harvest.store_path)?);
        let pipeline = IngestPipeline::new(
            fetcher,
            store,
            self.events.clone(),
            self.config.harvest.clone(),
        );
        pipeline.execute(target).await
    }
}
