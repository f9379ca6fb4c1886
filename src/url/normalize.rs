use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a URL into a crawl candidate
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Require an HTTP or HTTPS scheme
/// 3. Require a host
/// 4. Remove fragment (everything after #)
/// 5. Remove query string (everything after ?)
///
/// Host lowercasing and dot-segment removal come from the URL parser itself.
///
/// # Examples
///
/// ```
/// use campus_corpus::url::normalize_url;
///
/// let url = normalize_url("https://CMPE.tedu.edu.tr/en/staff?page=2#top").unwrap();
/// assert_eq!(url.as_str(), "https://cmpe.tedu.edu.tr/en/staff");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    strip_url(url)
}

/// Resolves a link href against the page it was found on
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links (same page anchors)
/// - anything that does not resolve to an HTTP(S) URL with a host
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let joined = base_url.join(href).ok()?;
    strip_url(joined).ok()
}

fn strip_url(mut url: Url) -> UrlResult<Url> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);
    url.set_query(None);

    Ok(url)
}
