//! Record fetcher for the Random Data API
//!
//! One blocking round trip per call: no retry, no pagination beyond the
//! `size` cap. The API is expected to return at most `limit` records in a
//! single page.

use crate::error::{ConnectorError, Result};
use crate::registry::StreamDefinition;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Issues probe and fetch requests against `{base_url}/{stream}`
#[derive(Debug, Clone)]
pub struct RecordFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl RecordFetcher {
    /// Create a fetcher with the default request timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a fetcher with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ConnectorError::connectivity(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe URI for a stream
    pub fn probe_url(&self, stream: &str) -> String {
        format!("{}/{}", self.base_url, stream)
    }

    /// Fetch URI for a stream and limit
    pub fn fetch_url(&self, stream: &str, limit: i64) -> String {
        format!("{}/{}?size={}", self.base_url, stream, limit)
    }

    /// Check that a stream endpoint answers 200
    pub async fn probe(&self, stream: &str) -> Result<()> {
        let url = self.probe_url(stream);
        debug!(%url, "Probing stream endpoint");

        let response = self.client.get(&url).send().await.map_err(|e| {
            ConnectorError::connectivity(format!("request to {} failed: {}", url, e))
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ConnectorError::connectivity(format!(
                "response error on checking random api source: {} from {}",
                status.as_u16(),
                url
            )));
        }
        Ok(())
    }

    /// Fetch one page of up to `limit` records for a stream
    pub async fn fetch(
        &self,
        stream: &StreamDefinition,
        limit: i64,
    ) -> Result<Vec<serde_json::Value>> {
        let url = self.fetch_url(stream.name(), limit);
        debug!(%url, stream = stream.name(), "Fetching records");

        let network = |source: reqwest::Error| ConnectorError::Network {
            url: url.clone(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(network)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ConnectorError::UnexpectedStatus {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(network)?;
        let records = stream.decode(&body)?;
        debug!(
            stream = stream.name(),
            count = records.len(),
            "Decoded records"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let fetcher = RecordFetcher::new("http://test").unwrap();
        assert_eq!(fetcher.probe_url("widgets"), "http://test/widgets");
        assert_eq!(fetcher.fetch_url("widgets", 2), "http://test/widgets?size=2");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let fetcher = RecordFetcher::new("https://random-data-api.com/api/v2/").unwrap();
        assert_eq!(fetcher.base_url(), "https://random-data-api.com/api/v2");
        assert_eq!(
            fetcher.fetch_url("beers", 10),
            "https://random-data-api.com/api/v2/beers?size=10"
        );
    }

    #[tokio::test]
    async fn test_probe_unreachable_is_connectivity_error() {
        // Port 9 (discard) on loopback is not expected to run an HTTP server
        let fetcher =
            RecordFetcher::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = fetcher.probe("widgets").await.unwrap_err();
        assert!(matches!(err, ConnectorError::Connectivity(_)));
    }
}
