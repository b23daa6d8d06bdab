//! Class-name markers for Zoopla's generated markup.
//!
//! Zoopla builds class attributes from emotion-style hashes with a stable
//! role suffix, e.g. `css-1anhqz4-ListingsContainer`. Matching is
//! substring-based so the hash prefix can churn without breaking the scan.
//!
//! **Update process**: when a scan returns zero prices on a page that
//! clearly has listings, capture an HTML sample, update the markers here,
//! and add a test fixture.

/// Marker substrings and tag names used by the page scan, keyed by role.
///
/// Kept as one table so the matching strategy can change (substring vs.
/// prefix vs. regex) without touching the traversal code.
#[derive(Debug, Clone)]
pub struct Markers {
    /// Container holding every listing on the page.
    pub listings_container: &'static str,
    /// One listing's price block.
    pub price_container: &'static str,
    /// Inline text carrying the display price.
    pub price_text: &'static str,
    /// Title text within the price block, excluded from price extraction.
    pub price_title_text: &'static str,
    /// Generic container tag.
    pub container_tag: &'static str,
    /// Inline text tag.
    pub text_tag: &'static str,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            listings_container: "ListingsContainer",
            price_container: "PriceContainer",
            price_text: "Text",
            price_title_text: "PriceTitleText",
            container_tag: "div",
            text_tag: "p",
        }
    }
}

impl Markers {
    /// Matches a class attribute value against a role marker.
    ///
    /// Case-sensitive substring check, not an exact class-name match.
    pub fn class_matches(&self, class_attr: &str, marker: &str) -> bool {
        class_attr.contains(marker)
    }
}
