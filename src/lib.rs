//! zoopla-prices - Zoopla listing price survey CLI
//!
//! Scrapes paginated for-sale search results, collects the asking price of
//! every listing, writes them to a JSON file, and reports summary statistics.

pub mod commands;
pub mod config;
pub mod stats;
pub mod zoopla;

pub use config::Config;
pub use stats::PriceStats;
pub use zoopla::models::SearchParams;
