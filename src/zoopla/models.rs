//! Data models for Zoopla search requests.

use serde::{Deserialize, Serialize};

/// Search filters carried into every page request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Postcode or outcode to search around, e.g. "OX49" or "SW1A 1AA".
    pub postcode: String,
    /// Minimum asking price in pounds.
    pub price_min: Option<u64>,
    /// Maximum asking price in pounds.
    pub price_max: Option<u64>,
    /// Minimum number of bedrooms.
    pub beds_min: Option<u32>,
    /// Maximum number of bedrooms.
    pub beds_max: Option<u32>,
    /// Search radius in miles around the postcode.
    pub radius: u32,
}

impl SearchParams {
    /// Creates search parameters for a postcode with no filters.
    pub fn new(postcode: impl Into<String>) -> Self {
        Self {
            postcode: postcode.into(),
            price_min: None,
            price_max: None,
            beds_min: None,
            beds_max: None,
            radius: 0,
        }
    }
}
