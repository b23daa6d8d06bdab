//! HTTP client for Zoopla requests using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::zoopla::models::SearchParams;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use wreq::{Client, StatusCode};
use wreq_util::Emulation;

/// Trait for fetching search result pages - enables mocking for tests.
#[async_trait]
pub trait PageFetch: Send + Sync {
    /// Fetches one search result page and returns the HTML body.
    async fn fetch_page(&self, params: &SearchParams, page: u32) -> Result<String>;
}

/// A page request that failed at the transport or HTTP level.
///
/// Always fatal to the run: the pagination driver wraps it with the failing
/// page number and aborts.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: wreq::Error,
    },
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: StatusCode },
}

/// Zoopla HTTP client with browser impersonation.
pub struct ZooplaClient {
    client: Client,
    base_url: String,
}

impl ZooplaClient {
    /// Creates a new Zoopla client with the given configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None).await
    }

    /// Creates a new client with an optional custom base URL (for testing).
    pub async fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, base_url: base_url.unwrap_or_else(|| config.base_url.clone()) })
    }

    /// Composes the search URL for one result page.
    ///
    /// The postcode becomes a path segment; filters, the page number, and
    /// two fixed exclusions go in the query string.
    pub fn page_url(&self, params: &SearchParams, page: u32) -> String {
        let mut query: Vec<(&str, String)> = Vec::new();

        if let Some(min) = params.price_min {
            query.push(("price_min", min.to_string()));
        }
        if let Some(max) = params.price_max {
            query.push(("price_max", max.to_string()));
        }
        if let Some(min) = params.beds_min {
            query.push(("beds_min", min.to_string()));
        }
        if let Some(max) = params.beds_max {
            query.push(("beds_max", max.to_string()));
        }
        query.push(("radius", params.radius.to_string()));
        query.push(("pn", page.to_string()));
        query.push(("is_retirement_home", "false".to_string()));
        query.push(("is_shared_ownership", "false".to_string()));

        let query =
            query.iter().map(|(k, v)| format!("{}={}", k, v)).collect::<Vec<_>>().join("&");

        format!(
            "{}/{}?{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&params.postcode),
            query
        )
    }

    /// Performs a GET request, requiring a 200 response.
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", "en-GB,en;q=0.9")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .map_err(|source| FetchError::Transport { url: url.to_string(), source })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status != StatusCode::OK {
            return Err(FetchError::Status { url: url.to_string(), status });
        }

        response
            .text()
            .await
            .map_err(|source| FetchError::Transport { url: url.to_string(), source })
    }
}

#[async_trait]
impl PageFetch for ZooplaClient {
    async fn fetch_page(&self, params: &SearchParams, page: u32) -> Result<String> {
        let url = self.page_url(params, page);

        info!("Fetching page {} for {}", page, params.postcode);
        Ok(self.get(&url).await?)
    }
}
