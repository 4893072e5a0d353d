//! Downloading article HTML.
//!
//! [`FetchHtml`] is the seam between the pipeline and the network: the
//! crawler only needs "give me the HTML for this URL". [`HttpFetcher`] is the
//! `reqwest` implementation; tests substitute an in-memory one.
//!
//! No retry and no timeout: a failed URL is skipped by the caller and a hung
//! connection blocks the batch.

use crate::error::CrawlError;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("news_harvest/", env!("CARGO_PKG_VERSION"));

/// Trait for fetching the raw HTML of a page.
pub trait FetchHtml {
    /// Fetch `url` and return its body as text.
    ///
    /// Any failure is reported as [`CrawlError::Fetch`].
    async fn fetch_html(&self, url: &str) -> Result<String, CrawlError>;
}

/// Fetches pages over HTTP with a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher that identifies itself with `user_agent`.
    pub fn new(user_agent: &str) -> Result<Self, CrawlError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl FetchHtml for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_html(&self, url: &str) -> Result<String, CrawlError> {
        let t0 = Instant::now();
        let res = async {
            let response = self.client.get(url).send().await?.error_for_status()?;
            response.text().await
        }
        .await;
        let dt = t0.elapsed();

        match res {
            Ok(body) => {
                debug!(elapsed_ms = dt.as_millis() as u64, bytes = body.len(), "Fetched page");
                Ok(body)
            }
            Err(e) => {
                warn!(elapsed_ms = dt.as_millis() as u64, error = %e, "Page fetch failed");
                Err(CrawlError::Fetch {
                    url: url.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
