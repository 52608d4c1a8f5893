// src/fetch.rs
// =============================================================================
// This module is the HTTP collaborator: give it an absolute URL, get back
// the response body text or a fetch error.
//
// The crawl engine only ever talks to the `Fetch` trait, never to reqwest
// directly. That seam is what lets the worker-pool tests run against a
// canned in-memory site instead of the network.
//
// Key decisions:
// - One shared reqwest Client (connection pooling, one TLS config)
// - 10 second timeout per request
// - A non-2xx status is a fetch error, same as a transport failure: the
//   worker reports it and moves on, no retry
//
// Rust concepts:
// - async-trait: async methods in traits (object-safe, Send futures)
// - Arc<dyn Fetch>: workers share one fetcher without knowing its type
// =============================================================================

use crate::error::CrawlError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

// The external fetch capability the worker pool depends on.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches the body text of an absolute URL.
    async fn fetch(&self, url: &str) -> Result<String, CrawlError>;
}

// The real implementation, backed by reqwest.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> anyhow::Result<Self> {
        // Build the client once; it's cheap to clone and pools connections
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CrawlError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}", status.as_u16()),
            });
        }

        response.text().await.map_err(|e| CrawlError::Fetch {
            url: url.to_string(),
            reason: format!("body read failed: {e}"),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StaticFetcher;
    use super::*;

    #[tokio::test]
    async fn test_static_fetcher_serves_known_pages() {
        let fetcher = StaticFetcher::new(&[("http://example.test/", "<html></html>")]);
        let body = fetcher.fetch("http://example.test/").await.unwrap();
        assert_eq!(body, "<html></html>");
    }

    #[tokio::test]
    async fn test_static_fetcher_404s_unknown_pages() {
        let fetcher = StaticFetcher::new(&[]);
        let err = fetcher.fetch("http://example.test/missing").await.unwrap_err();
        assert!(matches!(err, CrawlError::Fetch { .. }));
    }
}
