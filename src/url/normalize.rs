use crate::UrlError;
use url::Url;

/// Normalizes an address string into a crawl identity key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything that is not http or https
/// 3. Reject URLs without a host
/// 4. Remove the query string
/// 5. Remove the fragment
///
/// Scheme and host are lower-cased by the `url` parser itself. The path is
/// left exactly as the parser resolved it, so `/a` and `/a/` stay distinct.
///
/// # Examples
///
/// ```
/// use ripple_indexer::url::normalize_url;
///
/// let url = normalize_url("http://x/a?q=1#f").unwrap();
/// assert_eq!(url.as_str(), "http://x/a");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(url)
}

/// Normalizes an already-parsed URL
///
/// Used by the link extractor, which resolves hrefs against a base URL and
/// therefore never holds the raw string form.
pub fn normalize_parsed(mut url: Url) -> Result<Url, UrlError> {
    if !is_crawlable_scheme(&url) {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Returns true for the schemes the crawler follows
pub fn is_crawlable_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
