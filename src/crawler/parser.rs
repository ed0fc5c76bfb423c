//! HTML link extraction
//!
//! Finds `<a href>` targets in a fetched page and turns them into normalized
//! crawl addresses.

use crate::url::normalize_parsed;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts the set of crawlable addresses referenced by a page
///
/// # Link Extraction Rules
///
/// - Only `<a href="...">` elements are considered
/// - Each href is trimmed and resolved against `base_url`
/// - Targets that are not http/https after resolution are dropped
/// - Query strings and fragments are removed
/// - Hrefs that fail to resolve are skipped without affecting the others
///
/// The html5ever parser behind `scraper` recovers from malformed markup, so a
/// broken page still yields whatever links it does contain.
///
/// # Example
///
/// ```
/// use ripple_indexer::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/docs?x=1">Docs</a><a href="mailto:me@example.com">Mail</a>"#;
/// let base = Url::parse("https://example.com/index.html").unwrap();
/// let links = extract_links(html, &base);
/// assert_eq!(links.len(), 1);
/// assert!(links.contains(&Url::parse("https://example.com/docs").unwrap()));
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> HashSet<Url> {
    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_link(href, base_url) {
                links.insert(absolute_url);
            }
        }
    }

    links
}

/// Resolves a single href to a normalized absolute address
///
/// Returns None when the href is empty, cannot be joined onto the base, or
/// resolves to a scheme the crawler does not follow.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => normalize_parsed(absolute_url).ok(),
        Err(e) => {
            tracing::trace!("Skipping malformed link '{}': {}", href, e);
            None
        }
    }
}
