//! Price survey command: paginate through search results and collect prices.

use crate::config::Config;
use crate::zoopla::markers::Markers;
use crate::zoopla::scan::scan_page;
use crate::zoopla::{PageFetch, ZooplaClient};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Collects every listing price for a search, one page at a time.
pub struct SurveyCommand {
    config: Config,
}

impl SurveyCommand {
    /// Creates a new survey command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the survey and returns all collected prices.
    pub async fn execute(&self) -> Result<Vec<u64>> {
        let client =
            ZooplaClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.collect_with_client(&client).await
    }

    /// Runs the survey with a provided fetch collaborator (for testing).
    ///
    /// Pages are fetched strictly one after another, starting at page 1.
    /// The first page that yields no prices ends the survey; whether the
    /// listings container was missing or merely empty is not distinguished.
    /// Any fetch failure aborts the whole run, tagged with the page number.
    pub async fn collect_with_client(&self, client: &impl PageFetch) -> Result<Vec<u64>> {
        let params = self.config.search_params();
        let markers = Markers::default();

        info!("Surveying prices around {}", params.postcode);

        let mut all_prices = Vec::new();
        let mut page = 1u32;

        loop {
            let html = client
                .fetch_page(&params, page)
                .await
                .with_context(|| format!("while getting page {}", page))?;

            let prices = scan_page(&html, &markers);
            if prices.is_empty() {
                debug!("Page {} had no prices, stopping", page);
                break;
            }

            debug!("Page {} yielded {} prices", page, prices.len());
            all_prices.extend(prices);
            page += 1;
        }

        Ok(all_prices)
    }
}

/// Writes the collected prices to a file as a JSON array of integers.
///
/// The file is written in full, replacing any existing file at the path.
pub fn write_prices(prices: &[u64], path: &Path) -> Result<()> {
    let data = serde_json::to_vec(prices).context("Failed to serialize price data")?;

    std::fs::write(path, data)
        .with_context(|| format!("Failed to write price data to {}", path.display()))
}
