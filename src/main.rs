//! zoopla-prices - Zoopla listing price survey CLI
//!
//! A Rust implementation with TLS fingerprint emulation for reliable scraping.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use zoopla_prices::commands::{write_prices, SurveyCommand};
use zoopla_prices::config::Config;
use zoopla_prices::stats::PriceStats;

#[derive(Parser)]
#[command(
    name = "zoopla-prices",
    version,
    about = "Collects listing prices from Zoopla for-sale search results",
    long_about = "Walks every page of a Zoopla for-sale search, collects the asking \
                  price of each listing, writes them to a JSON file, and reports the \
                  mean and standard deviation."
)]
struct Cli {
    /// Postcode or outcode to search around (e.g. "OX49")
    postcode: String,

    /// Minimum asking price in pounds
    #[arg(long)]
    price_min: Option<u64>,

    /// Maximum asking price in pounds
    #[arg(long)]
    price_max: Option<u64>,

    /// Minimum number of bedrooms
    #[arg(long)]
    beds_min: Option<u32>,

    /// Maximum number of bedrooms
    #[arg(long)]
    beds_max: Option<u32>,

    /// Search radius in miles
    #[arg(short, long, default_value = "0")]
    radius: u32,

    /// Output file for the collected prices
    #[arg(short, long, default_value = "prices.json")]
    output: PathBuf,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, env = "ZOOPLA_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.postcode = cli.postcode;
    config.radius = cli.radius;
    config.output = cli.output;

    if let Some(min) = cli.price_min {
        config.price_min = Some(min);
    }
    if let Some(max) = cli.price_max {
        config.price_max = Some(max);
    }
    if let Some(min) = cli.beds_min {
        config.beds_min = Some(min);
    }
    if let Some(max) = cli.beds_max {
        config.beds_max = Some(max);
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    let output = config.output.clone();
    let cmd = SurveyCommand::new(config);
    let prices = cmd.execute().await?;

    info!("got {} prices", prices.len());
    if prices.is_empty() {
        return Ok(());
    }

    write_prices(&prices, &output)?;
    info!("wrote price data to {}", output.display());

    let stats = PriceStats::from_prices(&prices);
    info!("price stats: {}", stats);

    Ok(())
}
