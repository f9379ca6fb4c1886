use url::Url;

/// Extracts the host of a URL as a rate-limiting key
///
/// The host is lowercased and the port, when present, is kept: two services
/// on one machine are throttled separately.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use campus_corpus::url::host_key;
///
/// let url = Url::parse("https://CMPE.tedu.edu.tr/en").unwrap();
/// assert_eq!(host_key(&url), Some("cmpe.tedu.edu.tr".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(host_key(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_host() {
        let url = Url::parse("https://www.tedu.edu.tr/en").unwrap();
        assert_eq!(host_key(&url), Some("www.tedu.edu.tr".to_string()));
    }

    #[test]
    fn test_subdomains_are_distinct() {
        let a = Url::parse("https://cmpe.tedu.edu.tr/").unwrap();
        let b = Url::parse("https://career.tedu.edu.tr/").unwrap();
        assert_ne!(host_key(&a), host_key(&b));
    }

    #[test]
    fn test_default_port_is_omitted() {
        let url = Url::parse("https://tedu.edu.tr:443/en").unwrap();
        assert_eq!(host_key(&url), Some("tedu.edu.tr".to_string()));
    }

    #[test]
    fn test_explicit_port_is_kept() {
        let url = Url::parse("http://localhost:3000/").unwrap();
        assert_eq!(host_key(&url), Some("localhost:3000".to_string()));
    }
}
