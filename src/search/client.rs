use crate::metrics::UpstreamMetrics;
use crate::models::{ListingRecord, SearchCriteria};
use crate::search::traits::ListingSource;
use crate::search::FetchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "https://api.domain.com.au/v1/listings/residential/_search";

/// Domain residential search client
pub struct DomainClient {
    client: Client,
    api_url: String,
    api_key: String,
    metrics: Option<UpstreamMetrics>,
}

impl DomainClient {
    /// Create a client for `api_url`. `page_timeout` bounds each page request.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        page_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(page_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            metrics: None,
        })
    }

    /// Count every call in `metrics`
    pub fn with_metrics(mut self, metrics: UpstreamMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn observe(&self, code: &str, started: Instant) {
        if let Some(metrics) = &self.metrics {
            metrics.observe(code, started.elapsed());
        }
    }

    fn transport_error(&self, source: reqwest::Error) -> FetchError {
        FetchError::Transport {
            url: self.api_url.clone(),
            source,
        }
    }
}

#[async_trait]
impl ListingSource for DomainClient {
    async fn search_page(&self, criteria: &SearchCriteria) -> Result<Vec<ListingRecord>, FetchError> {
        info!(
            url = %self.api_url,
            page = criteria.page_number,
            ?criteria,
            "Requesting listings page"
        );

        let started = Instant::now();
        let response = self
            .client
            .post(&self.api_url)
            .header("X-Api-Key", &self.api_key)
            .header(ACCEPT, "application/json")
            .json(criteria)
            .send()
            .await
            .map_err(|e| {
                self.observe("error", started);
                self.transport_error(e)
            })?;

        let status = response.status();
        // Read the whole body whatever the status so the connection goes back to the pool
        let body = response.bytes().await.map_err(|e| {
            self.observe("error", started);
            self.transport_error(e)
        })?;
        self.observe(status.as_str(), started);

        if status != StatusCode::OK {
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!(status = status.as_u16(), %body, "Listings API returned an error");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let listings: Vec<ListingRecord> = serde_json::from_slice(&body)?;
        info!(
            page = criteria.page_number,
            count = listings.len(),
            "Got listings page"
        );

        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "Domain"
    }
}
