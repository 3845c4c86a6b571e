//! # HTTP Client
//!
//! Thin wrapper around a shared `reqwest::Client` configured for the WONS
//! portal: user agent, request timeout, bounded redirects and gzip
//! decompression. Fetch failures carry the offending URL so the pipeline
//! can report them per target.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode, redirect};
use thiserror::Error;
use tracing::debug;

use super::config::HttpConfig;

/// Errors raised while building the client or fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid user agent `{value}`")]
    InvalidUserAgent { value: String },

    #[error("failed to build HTTP client: {source}")]
    Build { source: reqwest::Error },

    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: StatusCode },
}

/// HTTP client shared by every fetch in a run.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client from the HTTP settings.
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| FetchError::InvalidUserAgent {
                value: config.user_agent.clone(),
            })?;
        headers.insert(USER_AGENT, agent);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .redirect(redirect::Policy::limited(10))
            .gzip(true)
            .build()
            .map_err(|source| FetchError::Build { source })?;

        Ok(Self { client })
    }

    /// Fetches a URL and returns the response body as text.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching URL: {}", url);

        let response = self.client.get(url).send().await.map_err(|source| {
            FetchError::Transport {
                url: url.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        debug!("Successfully fetched: {} ({} chars)", url, text.len());
        Ok(text)
    }
}
