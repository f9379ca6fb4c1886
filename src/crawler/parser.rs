//! HTML link extraction for the discovery pass

use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Extracts every followable link from an HTML page
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links
///
/// Links are resolved against `base_url` and come back with fragment and
/// query stripped. Duplicates are kept in document order; deduplication is
/// the frontier's job.
///
/// # Example
///
/// ```
/// use campus_corpus::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/en/staff?page=2">Staff</a><a href="mailto:x@tedu.edu.tr">Mail</a>"#;
/// let base = Url::parse("https://cmpe.tedu.edu.tr/en").unwrap();
/// let links = extract_links(html, &base);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://cmpe.tedu.edu.tr/en/staff");
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
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
