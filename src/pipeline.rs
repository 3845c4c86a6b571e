//! Pipeline layer for executing harvest runs
//!
//! A run moves through fixed phases: the target address is resolved and
//! fetched, discovered wells are deduplicated against the store, admitted
//! wells are fetched under a concurrency cap, and extracted records are
//! appended one at a time. The orchestrator drives the phases; the
//! deduplicator and run state are its working parts.

pub mod dedup;
pub mod orchestrator;
pub mod state;

// Re-export commonly used items
pub use dedup::{Deduplicator, FilterReport};
pub use orchestrator::{HarvestError, IngestPipeline};
pub use state::RunStats;
