//! # Ingest Pipeline
//!
//! Orchestrates one harvest run. The listing path fetches the listing page,
//! filters the discovered wells against the store, then fans their fetches
//! out under a concurrency cap; the detail path handles its single well the
//! same way minus the fan-out. Extracted records are appended one at a time
//! and per-target failures are counted and reported, never fatal to the
//! run. The completion summary is always produced.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::application::events::EventEmitter;
use crate::domain::canonical_key::KeyParts;
use crate::domain::events::{RunId, RunOutcome, RunSummary};
use crate::domain::range::CoordinateRange;
use crate::domain::request::PlanError;
use crate::domain::target::HarvestTarget;
use crate::domain::well_code::WellCode;
use crate::infrastructure::config::{HarvestConfig, utils};
use crate::infrastructure::extractor::WellDataExtractor;
use crate::infrastructure::page_fetcher::PageFetcher;
use crate::infrastructure::store::{CsvWellStore, StoreError};
use crate::pipeline::dedup::Deduplicator;
use crate::pipeline::state::RunStats;

/// Errors that abort a run before any fetch is dispatched. Failures after
/// dispatch are counted in the summary instead.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The HTTP client could not be built; no per-target fetch error ever
    /// takes this path.
    #[error(transparent)]
    Client(#[from] crate::infrastructure::http_client::FetchError),
}

/// One-run orchestrator over the fetcher, extractor and store.
pub struct IngestPipeline {
    fetcher: Arc<dyn PageFetcher>,
    extractor: WellDataExtractor,
    store: Arc<CsvWellStore>,
    events: EventEmitter,
    config: HarvestConfig,
}

impl IngestPipeline {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<CsvWellStore>,
        events: EventEmitter,
        config: HarvestConfig,
    ) -> Self {
        Self {
            fetcher,
            extractor: WellDataExtractor::new(),
            store,
            events,
            config,
        }
    }

    /// Executes one run against the given target and returns its summary.
    pub async fn execute(&self, target: HarvestTarget) -> Result<RunSummary, HarvestError> {
        let stats = RunStats::new(RunId::new());
        let run_id = stats.run_id();
        info!("Run {} started: {} target", run_id, target.kind());
        self.events.emit_run_started(run_id, target.kind());

        let mut dedup = Deduplicator::from_store(&self.store)?;

        match &target {
            HarvestTarget::Listing { quadrants, blocks } => {
                self.run_listing(quadrants, blocks, &mut dedup, &stats).await;
            }
            HarvestTarget::WellDetail { quadrant, code } => {
                self.run_detail(quadrant, code, &mut dedup, &stats).await;
            }
        }

        let summary = stats.summarize(RunOutcome::Completed).await;
        info!(
            "Run {} completed: {} appended, {} skipped, {} failed",
            run_id,
            summary.records_appended,
            summary.skipped_known,
            summary.failure_count()
        );
        self.events.emit_completed(summary.clone());
        Ok(summary)
    }

    async fn run_listing(
        &self,
        quadrants: &CoordinateRange,
        blocks: &CoordinateRange,
        dedup: &mut Deduplicator,
        stats: &RunStats,
    ) {
        let run_id = stats.run_id();
        let address = utils::listing_address(quadrants, blocks);
        let url = utils::resolve_url(&self.config.base_url, &address);

        let html = match self.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(fetch_error) => {
                error!("Listing fetch failed: {}", fetch_error);
                stats.record_fetch_failure().await;
                self.events
                    .emit_target_failed(run_id, &address, &fetch_error.to_string());
                return;
            }
        };

        let links = self.extractor.listing_links(&html);
        let report = dedup.filter_new(links);
        stats.record_filter(&report).await;
        info!(
            "Listing scanned: {} discovered, {} admitted, {} known, {} duplicate, {} malformed",
            report.discovered(),
            report.admitted.len(),
            report.skipped_known,
            report.duplicate_addresses,
            report.malformed
        );
        self.events.emit_listing_scanned(
            run_id,
            report.discovered(),
            report.admitted.len() as u64,
            report.skipped_known,
            report.duplicate_addresses,
            report.malformed,
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_fetches));
        let mut tasks = JoinSet::new();
        for address in report.admitted {
            // Links on the listing page are relative to its directory.
            let Some(well_url) = utils::resolve_link(&url, &address) else {
                warn!("Unresolvable link {}; skipping", address);
                stats.record_fetch_failure().await;
                self.events
                    .emit_target_failed(run_id, &address, "unresolvable link");
                continue;
            };
            // Acquiring before spawning keeps at most the configured number
            // of fetch tasks alive; the semaphore is never closed while the
            // run executes.
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            let fetcher = Arc::clone(&self.fetcher);
            let extractor = self.extractor.clone();
            let store = Arc::clone(&self.store);
            let events = self.events.clone();
            let task_stats = stats.clone();
            tasks.spawn(async move {
                let _permit = permit;
                Self::harvest_one(fetcher, extractor, store, events, task_stats, address, well_url)
                    .await;
            });
        }
        while let Some(joined) = tasks.join_next().await {
            if let Err(join_error) = joined {
                error!("Fetch task failed to join: {}", join_error);
            }
        }
    }

    async fn run_detail(
        &self,
        quadrant: &str,
        code: &WellCode,
        dedup: &mut Deduplicator,
        stats: &RunStats,
    ) {
        let key = KeyParts::from_well(quadrant, code).canonical_key();
        if !dedup.admit(&key) {
            info!("Well {} already stored; skipping fetch", key);
            stats.record_single_skipped().await;
            return;
        }
        stats.record_single_admitted().await;

        let address = utils::well_detail_address(quadrant, code);
        let url = utils::resolve_url(&self.config.base_url, &address);
        Self::harvest_one(
            Arc::clone(&self.fetcher),
            self.extractor.clone(),
            Arc::clone(&self.store),
            self.events.clone(),
            stats.clone(),
            address,
            url,
        )
        .await;
    }

    /// Fetches, extracts and appends one well. Failures are folded into the
    /// stats and emitted; they never propagate.
    async fn harvest_one(
        fetcher: Arc<dyn PageFetcher>,
        extractor: WellDataExtractor,
        store: Arc<CsvWellStore>,
        events: EventEmitter,
        stats: RunStats,
        address: String,
        url: String,
    ) {
        let html = match fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(fetch_error) => {
                warn!("Well fetch failed for {}: {}", address, fetch_error);
                stats.record_fetch_failure().await;
                events.emit_target_failed(stats.run_id(), &address, &fetch_error.to_string());
                return;
            }
        };

        let record = match extractor.well_record(&html) {
            Ok(record) => record,
            Err(extract_error) => {
                warn!("Extraction failed for {}: {}", address, extract_error);
                stats.record_extract_failure().await;
                events.emit_target_failed(stats.run_id(), &address, &extract_error.to_string());
                return;
            }
        };

        match store.append(&record).await {
            Ok(()) => {
                stats.record_appended().await;
                events.emit_record_appended(stats.run_id(), record.registration_no());
            }
            Err(store_error) => {
                error!("Append failed for {}: {}", address, store_error);
                stats.record_append_failure().await;
                events.emit_target_failed(stats.run_id(), &address, &store_error.to_string());
            }
        }
    }
}
