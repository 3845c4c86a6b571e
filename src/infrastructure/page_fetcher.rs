//! # Page Fetcher
//!
//! Trait seam between the pipeline and the network. The pipeline only ever
//! asks for a page body by URL, so tests can swap in a canned fetcher.

use async_trait::async_trait;

use super::config::HttpConfig;
use super::http_client::{FetchError, HttpClient};

/// Fetches one page body by absolute URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Production fetcher backed by the shared HTTP client.
pub struct HttpPageFetcher {
    client: HttpClient,
}

impl HttpPageFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: HttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.client.get_text(url).await
    }
}
