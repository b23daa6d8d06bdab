//! Structural scan of Zoopla search result pages.
//!
//! The scan walks the parsed document tree directly instead of using CSS
//! selectors: class names on Zoopla are auto-generated and only their role
//! suffixes are stable, so every match is a substring check against the
//! [`Markers`] table. Traversal uses an explicit work stack (pre-order,
//! first match wins) so deeply nested markup cannot blow the call stack.

use crate::zoopla::markers::Markers;
use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::warn;

/// Failure to turn a single price container into a price.
///
/// All variants are per-listing and non-fatal: the scanner logs them and
/// moves on to the next listing.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot find price data to parse")]
    PriceNotFound,
    #[error("no price in text node")]
    EmptyPriceText,
    #[error(transparent)]
    Price(#[from] PriceParseError),
}

/// A display string that did not normalize to an unsigned integer.
#[derive(Debug, Error)]
#[error("invalid price text {raw:?}")]
pub struct PriceParseError {
    raw: String,
    #[source]
    source: std::num::ParseIntError,
}

/// Parses a display price like `"£435,000"` into whole pounds.
///
/// Normalization order: trim surrounding whitespace, drop every comma,
/// strip at most one leading `£`. Whatever remains must be a base-10
/// unsigned integer.
pub fn parse_price(raw: &str) -> Result<u64, PriceParseError> {
    let cleaned = raw.trim().replace(',', "");
    let digits = cleaned.strip_prefix('£').unwrap_or(cleaned.as_str());

    digits.parse().map_err(|source| PriceParseError { raw: raw.to_string(), source })
}

/// Parses a fetched page and returns its listing prices in document order.
///
/// A page without a listings container is not an error: it yields an empty
/// list, which the pagination driver treats as the end of results.
pub fn scan_page(html: &str, markers: &Markers) -> Vec<u64> {
    let document = Html::parse_document(html);

    match find_listings_container(&document, markers) {
        Some(listings) => scan_listings(listings, markers),
        None => {
            warn!("no listings container in response");
            Vec::new()
        }
    }
}

/// Finds the container holding all listings on the page.
///
/// Depth-first pre-order over the whole document; the first `<div>` whose
/// class attribute matches the listings-container marker wins. Returns
/// `None` when the page has no such container.
pub fn find_listings_container<'a>(document: &'a Html, markers: &Markers) -> Option<ElementRef<'a>> {
    let mut stack = vec![document.tree.root()];

    while let Some(node) = stack.pop() {
        if let Some(element) = ElementRef::wrap(node) {
            if is_marked_container(element, markers, markers.listings_container) {
                return Some(element);
            }
        }

        // Reversed so the leftmost child is popped first (pre-order).
        let first = stack.len();
        stack.extend(node.children());
        stack[first..].reverse();
    }

    None
}

/// Collects every parseable price under the listings container.
///
/// Depth-first pre-order over the subtree; every `<div>` matching the
/// price-container marker is handed to [`extract_price`]. Listings that
/// fail to yield a price are logged and skipped, never aborting the scan.
pub fn scan_listings(listings: ElementRef<'_>, markers: &Markers) -> Vec<u64> {
    let mut prices = Vec::new();
    let mut stack = vec![*listings];

    while let Some(node) = stack.pop() {
        if let Some(element) = ElementRef::wrap(node) {
            if is_marked_container(element, markers, markers.price_container) {
                match extract_price(element, markers) {
                    Ok(price) => prices.push(price),
                    Err(e) => warn!("skipping listing: {}", e),
                }
            }
        }

        let first = stack.len();
        stack.extend(node.children());
        stack[first..].reverse();
    }

    prices
}

/// Pulls the display price out of a single price container.
///
/// Only immediate element children are considered: the price sits in a
/// `<p>` whose class matches the generic text marker but not the title
/// marker. That child's first text node holds the display string.
fn extract_price(container: ElementRef<'_>, markers: &Markers) -> Result<u64, ScanError> {
    for child in container.children() {
        let Some(element) = ElementRef::wrap(child) else { continue };

        if element.value().name() != markers.text_tag {
            continue;
        }

        let Some(class) = element.value().attr("class") else { continue };
        if !markers.class_matches(class, markers.price_text)
            || markers.class_matches(class, markers.price_title_text)
        {
            continue;
        }

        let text = child
            .first_child()
            .and_then(|n| n.value().as_text().map(|t| t.text.to_string()))
            .ok_or(ScanError::EmptyPriceText)?;

        return Ok(parse_price(&text)?);
    }

    Err(ScanError::PriceNotFound)
}

fn is_marked_container(element: ElementRef<'_>, markers: &Markers, marker: &str) -> bool {
    element.value().name() == markers.container_tag
        && element
            .value()
            .attr("class")
            .is_some_and(|class| markers.class_matches(class, marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Markers {
        Markers::default()
    }

    // Price parsing tests

    #[test]
    fn test_parse_price_typical() {
        assert_eq!(parse_price("£435,000").unwrap(), 435000);
        assert_eq!(parse_price("£1,250,000").unwrap(), 1250000);
        assert_eq!(parse_price("1,000").unwrap(), 1000);
        assert_eq!(parse_price("950000").unwrap(), 950000);
    }

    #[test]
    fn test_parse_price_whitespace() {
        assert_eq!(parse_price("  £12  ").unwrap(), 12);
        assert_eq!(parse_price("\n£435,000\t").unwrap(), 435000);
    }

    #[test]
    fn test_parse_price_invalid() {
        assert!(parse_price("").is_err());
        assert!(parse_price("abc").is_err());
        assert!(parse_price("£").is_err());
        assert!(parse_price("-100").is_err());
        assert!(parse_price("POA").is_err());
        assert!(parse_price("£435,000 pcm extra").is_err());
    }

    #[test]
    fn test_parse_price_strips_only_leading_symbol() {
        // A second symbol is not a valid digit.
        assert!(parse_price("££100").is_err());
        assert!(parse_price("100£").is_err());
    }

    // Listings locator tests

    #[test]
    fn test_find_listings_container_missing() {
        let document = Html::parse_document(
            r#"<html><body><div class="css-abc-Header">no listings here</div></body></html>"#,
        );
        assert!(find_listings_container(&document, &markers()).is_none());
    }

    #[test]
    fn test_find_listings_container_first_match_wins() {
        let document = Html::parse_document(
            r#"<html><body>
                <div id="first" class="css-1anhqz4-ListingsContainer"></div>
                <div id="second" class="css-9xk2ma-ListingsContainer"></div>
            </body></html>"#,
        );

        let listings = find_listings_container(&document, &markers()).unwrap();
        assert_eq!(listings.value().attr("id"), Some("first"));
    }

    #[test]
    fn test_find_listings_container_nested() {
        let document = Html::parse_document(
            r#"<html><body>
                <div class="wrapper">
                    <div class="inner">
                        <div id="deep" class="css-1anhqz4-ListingsContainer e2uk8e18"></div>
                    </div>
                </div>
            </body></html>"#,
        );

        let listings = find_listings_container(&document, &markers()).unwrap();
        assert_eq!(listings.value().attr("id"), Some("deep"));
    }

    #[test]
    fn test_find_listings_container_ignores_other_tags() {
        // The marker must sit on the container tag, not a section/span.
        let document = Html::parse_document(
            r#"<html><body><section class="css-abc-ListingsContainer"></section></body></html>"#,
        );
        assert!(find_listings_container(&document, &markers()).is_none());
    }

    // Listing scanner tests

    fn scan_str(html: &str) -> Vec<u64> {
        let document = Html::parse_document(html);
        let listings = find_listings_container(&document, &markers()).unwrap();
        scan_listings(listings, &markers())
    }

    #[test]
    fn test_scan_listings_document_order() {
        let prices = scan_str(
            r#"<html><body><div class="css-abc-ListingsContainer">
                <div class="css-d1-PriceContainer"><p class="css-p1-Text">£100,000</p></div>
                <div class="css-d2-PriceContainer"><p class="css-p2-Text">£250,000</p></div>
                <div class="css-d3-PriceContainer"><p class="css-p3-Text">£99,950</p></div>
            </div></body></html>"#,
        );
        assert_eq!(prices, vec![100000, 250000, 99950]);
    }

    #[test]
    fn test_scan_listings_skips_missing_text_node() {
        let prices = scan_str(
            r#"<html><body><div class="css-abc-ListingsContainer">
                <div class="css-d1-PriceContainer"><p class="css-p1-Text">£100,000</p></div>
                <div class="css-d2-PriceContainer"><p class="css-p2-Text"></p></div>
                <div class="css-d3-PriceContainer"><p class="css-p3-Text">£300,000</p></div>
            </div></body></html>"#,
        );
        assert_eq!(prices, vec![100000, 300000]);
    }

    #[test]
    fn test_scan_listings_skips_unparseable_price() {
        let prices = scan_str(
            r#"<html><body><div class="css-abc-ListingsContainer">
                <div class="css-d1-PriceContainer"><p class="css-p1-Text">POA</p></div>
                <div class="css-d2-PriceContainer"><p class="css-p2-Text">£450,000</p></div>
            </div></body></html>"#,
        );
        assert_eq!(prices, vec![450000]);
    }

    #[test]
    fn test_scan_listings_excludes_title_text() {
        // The title <p> comes first but must not be mistaken for the price.
        let prices = scan_str(
            r#"<html><body><div class="css-abc-ListingsContainer">
                <div class="css-d1-PriceContainer">
                    <p class="css-t1-PriceTitleText">Guide price</p>
                    <p class="css-p1-Text">£525,000</p>
                </div>
            </div></body></html>"#,
        );
        assert_eq!(prices, vec![525000]);
    }

    #[test]
    fn test_scan_listings_price_only_in_direct_children() {
        // A matching <p> buried one level deeper is out of reach, so this
        // listing is skipped rather than mis-extracted.
        let prices = scan_str(
            r#"<html><body><div class="css-abc-ListingsContainer">
                <div class="css-d1-PriceContainer">
                    <span><p class="css-p1-Text">£100,000</p></span>
                </div>
                <div class="css-d2-PriceContainer"><p class="css-p2-Text">£200,000</p></div>
            </div></body></html>"#,
        );
        assert_eq!(prices, vec![200000]);
    }

    #[test]
    fn test_scan_listings_deeply_nested_price_containers() {
        let prices = scan_str(
            r#"<html><body><div class="css-abc-ListingsContainer">
                <div class="row"><div class="cell">
                    <div class="css-d1-PriceContainer"><p class="css-p1-Text">£75,000</p></div>
                </div></div>
            </div></body></html>"#,
        );
        assert_eq!(prices, vec![75000]);
    }

    #[test]
    fn test_scan_page_without_container_is_empty() {
        let prices = scan_page("<html><body><p>maintenance page</p></body></html>", &markers());
        assert!(prices.is_empty());
    }

    #[test]
    fn test_scan_page_container_present_but_empty() {
        // Terminates pagination the same way as a missing container.
        let prices = scan_page(
            r#"<html><body><div class="css-abc-ListingsContainer"></div></body></html>"#,
            &markers(),
        );
        assert!(prices.is_empty());
    }

    // Price node extraction tests

    fn first_price_container(document: &Html) -> ElementRef<'_> {
        let listings = find_listings_container(document, &markers()).unwrap();
        let mut stack = vec![*listings];
        while let Some(node) = stack.pop() {
            if let Some(element) = ElementRef::wrap(node) {
                if is_marked_container(element, &markers(), markers().price_container) {
                    return element;
                }
            }
            let first = stack.len();
            stack.extend(node.children());
            stack[first..].reverse();
        }
        panic!("fixture has no price container");
    }

    #[test]
    fn test_extract_price_not_found() {
        let document = Html::parse_document(
            r#"<html><body><div class="css-abc-ListingsContainer">
                <div class="css-d1-PriceContainer"><p class="css-t1-PriceTitleText">Offers over</p></div>
            </div></body></html>"#,
        );
        let container = first_price_container(&document);
        assert!(matches!(extract_price(container, &markers()), Err(ScanError::PriceNotFound)));
    }

    #[test]
    fn test_extract_price_empty_text() {
        let document = Html::parse_document(
            r#"<html><body><div class="css-abc-ListingsContainer">
                <div class="css-d1-PriceContainer"><p class="css-p1-Text"></p></div>
            </div></body></html>"#,
        );
        let container = first_price_container(&document);
        assert!(matches!(extract_price(container, &markers()), Err(ScanError::EmptyPriceText)));
    }

    #[test]
    fn test_extract_price_unparseable_text() {
        let document = Html::parse_document(
            r#"<html><body><div class="css-abc-ListingsContainer">
                <div class="css-d1-PriceContainer"><p class="css-p1-Text">Price on application</p></div>
            </div></body></html>"#,
        );
        let container = first_price_container(&document);
        assert!(matches!(extract_price(container, &markers()), Err(ScanError::Price(_))));
    }
}
