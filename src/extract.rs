// src/extract.rs
// =============================================================================
// This module extracts raw href values from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Deliberately minimal: this returns the href attribute values exactly as
// they appear, in document order, without resolving or filtering them.
// Resolution against the page's URL and same-site/dedup filtering belong
// to the Frontier - keeping them there means every edge goes through the
// exact same normalization, no matter where it was discovered.
//
// Rust concepts:
// - Iterators: document.select() yields matching elements lazily
// - filter_map: extract-and-skip in one pass
// =============================================================================

use scraper::{Html, Selector};

// Extracts all anchor href values from HTML content, in document order.
//
// Parameters:
//   html: the page markup (borrowed as &str)
//
// Returns: Vec<String> of raw href attribute values
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='a.html#x'>A</a>"
//   result = ["/docs", "a.html#x"]
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // Selector::parse returns Result, so we use .unwrap() which panics on
    // error. This is OK here because our selector is a constant and known
    // to be valid.
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}
