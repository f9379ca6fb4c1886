//! URL handling module for Campus-Corpus
//!
//! This module provides URL normalization, link resolution, host extraction
//! and the admissibility filter that decides which URLs the crawler follows.

mod domain;
mod normalize;

use crate::config::{Config, FilterConfig};
use url::Url;

// Re-export main functions
pub use domain::host_key;
pub use normalize::{normalize_url, resolve_link};

/// The rule that rejected a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The URL could not be parsed
    Malformed,
    /// Scheme other than HTTP or HTTPS
    Scheme(String),
    /// Host does not contain the target domain
    OffDomain,
    /// URL references a stale year
    StaleYear(String),
    /// URL contains a noise keyword
    Noise(String),
    /// Path ends with a non-text extension
    Extension(String),
}

/// Admissibility filter for crawl candidates
///
/// The filter is a pure predicate: the same URL and configuration always
/// produce the same answer.
#[derive(Debug, Clone)]
pub struct UrlFilter {
    target_domain: String,
    stale_years: Vec<String>,
    noise_keywords: Vec<String>,
    skip_extensions: Vec<String>,
}

impl UrlFilter {
    /// Creates a filter for the given target domain and rule lists
    pub fn new(target_domain: &str, filter: &FilterConfig) -> Self {
        let lowered = |list: &[String]| list.iter().map(|s| s.to_lowercase()).collect();

        Self {
            target_domain: target_domain.to_lowercase(),
            stale_years: filter.stale_years.clone(),
            noise_keywords: lowered(&filter.noise_keywords),
            skip_extensions: lowered(&filter.skip_extensions),
        }
    }

    /// Creates a filter from the crawler and filter sections of a config
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.crawler.target_domain, &config.filter)
    }

    /// Returns true if the URL may enter the frontier
    ///
    /// # Examples
    ///
    /// ```
    /// use campus_corpus::config::Config;
    /// use campus_corpus::url::UrlFilter;
    ///
    /// let filter = UrlFilter::from_config(&Config::default());
    /// assert!(filter.admissible("https://cmpe.tedu.edu.tr/en/summer-internship"));
    /// assert!(!filter.admissible("https://cmpe.tedu.edu.tr/en/news/2023-event"));
    /// ```
    pub fn admissible(&self, url: &str) -> bool {
        self.check(url).is_ok()
    }

    /// Applies the rules in order and reports the first one that fails
    ///
    /// # Rules
    ///
    /// 1. Scheme must be `http` or `https`
    /// 2. Host must contain the target domain
    /// 3. URL must not contain a stale year token
    /// 4. URL must not contain a noise keyword (case-insensitive)
    /// 5. Path must not end with a non-text extension (case-insensitive)
    ///
    /// A URL that fails to parse is rejected.
    pub fn check(&self, url: &str) -> Result<(), Rejection> {
        let parsed = Url::parse(url).map_err(|_| Rejection::Malformed)?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Rejection::Scheme(parsed.scheme().to_string()));
        }

        let host = parsed.host_str().ok_or(Rejection::Malformed)?;
        if !host.to_lowercase().contains(&self.target_domain) {
            return Err(Rejection::OffDomain);
        }

        if let Some(year) = self.stale_years.iter().find(|year| url.contains(year.as_str())) {
            return Err(Rejection::StaleYear(year.clone()));
        }

        let lowered = url.to_lowercase();
        if let Some(keyword) = self
            .noise_keywords
            .iter()
            .find(|keyword| lowered.contains(keyword.as_str()))
        {
            return Err(Rejection::Noise(keyword.clone()));
        }

        let path = parsed.path().to_lowercase();
        if let Some(extension) = self
            .skip_extensions
            .iter()
            .find(|extension| path.ends_with(extension.as_str()))
        {
            return Err(Rejection::Extension(extension.clone()));
        }

        Ok(())
    }
}
