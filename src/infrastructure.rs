//! Infrastructure layer for configuration, HTTP access, extraction and storage
//!
//! This module provides the harvester's outward-facing machinery: the
//! configuration layer, the portal HTTP client, the page extractor, the
//! append-only CSV store and logging setup.

pub mod config;
pub mod extractor;
pub mod http_client;
pub mod logging;
pub mod page_fetcher;
pub mod store;

// Re-export commonly used items
pub use config::{AppConfig, ConfigError, HarvestConfig, HttpConfig, LoggingConfig, defaults, wons};
pub use extractor::{ExtractError, WellDataExtractor};
pub use http_client::{FetchError, HttpClient};
pub use logging::init_logging;
pub use page_fetcher::{HttpPageFetcher, PageFetcher};
pub use store::{CsvWellStore, StoreError};
