//! Zoopla-specific modules for the HTTP client, markup markers, and page scan.

pub mod client;
pub mod markers;
pub mod models;
pub mod scan;

pub use client::{FetchError, PageFetch, ZooplaClient};
pub use markers::Markers;
pub use models::SearchParams;
pub use scan::{parse_price, scan_page, PriceParseError, ScanError};
