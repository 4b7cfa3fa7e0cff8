//! HTML parser for extracting links
//!
//! This module parses fetched pages and yields the absolute URLs of their
//! anchors, in document order.

use scraper::{Html, Selector};
use url::Url;

/// Extracts the anchor targets of an HTML page as absolute URLs
///
/// # Link Extraction Rules
///
/// - Every `<a>` element with an `href` attribute, in document order
/// - Anchors without `href`, or with an empty one, are skipped
/// - Relative, protocol-relative and fragment-only references are resolved
///   against `base_url`
/// - Hrefs that cannot be resolved are skipped
/// - Repeated targets are kept; the crawl controller deduplicates
///
/// No scheme filtering happens here: `mailto:` and friends come out as-is
/// and are rejected by the scope filter.
///
/// # Example
///
/// ```
/// use subtree_scribe::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(
///     extract_links(html, &base_url),
///     vec!["https://example.com/page".to_string()]
/// );
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    anchor_targets(&document, base_url)
}

/// Collects the resolved `href` of every anchor in `document`
fn anchor_targets(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL
///
/// Returns None for empty hrefs and hrefs the URL parser rejects.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    base_url.join(href).ok().map(|url| url.to_string())
}
