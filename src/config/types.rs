use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Campus-Corpus
///
/// Every section is optional; missing keys fall back to the built-in
/// defaults that describe the TEDU crawl.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub filter: FilterConfig,
    pub output: OutputConfig,
    pub normalizer: NormalizerConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Substring every admissible host must contain
    pub target_domain: String,

    /// URLs the discovery pass starts from
    pub seeds: Vec<String>,

    /// Maximum number of distinct URLs the discovery pass will visit
    pub max_urls: usize,

    /// Per-request timeout during discovery (milliseconds)
    pub discovery_timeout_ms: u64,

    /// Per-request timeout during extraction (milliseconds)
    pub extraction_timeout_ms: u64,

    /// Minimum time between requests to the same host during discovery (milliseconds)
    pub discovery_delay_ms: u64,

    /// Minimum time between requests to the same host during extraction (milliseconds)
    pub request_delay_ms: u64,

    /// Number of fetches allowed in flight at once
    pub max_concurrent_fetches: usize,

    /// Log progress every N pages
    pub progress_interval: usize,
}

impl CrawlerConfig {
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }

    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_millis(self.extraction_timeout_ms)
    }

    pub fn discovery_delay(&self) -> Duration {
        Duration::from_millis(self.discovery_delay_ms)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            target_domain: "tedu.edu.tr".to_string(),
            seeds: vec![
                "https://cmpe.tedu.edu.tr/en".to_string(),
                "https://cmpe.tedu.edu.tr/en/summer-internship".to_string(),
                "https://career.tedu.edu.tr/en".to_string(),
                "https://www.tedu.edu.tr/en".to_string(),
                "https://www.tedu.edu.tr/en/regulations-and-guidelines".to_string(),
                "https://www.tedu.edu.tr/en/student-affairs".to_string(),
            ],
            max_urls: 1500,
            discovery_timeout_ms: 2000,
            extraction_timeout_ms: 5000,
            discovery_delay_ms: 0,
            request_delay_ms: 200,
            max_concurrent_fetches: 1,
            progress_interval: 20,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version` or `Name/Version (+ContactURL)`
    pub fn user_agent_string(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "TEDU_Student_Project_Bot".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: None,
        }
    }
}

/// URL admissibility rules
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FilterConfig {
    /// Tokens marking crawl paths that reference old dated content
    pub stale_years: Vec<String>,

    /// Substrings of news, events, blog and CMS-internal paths
    pub noise_keywords: Vec<String>,

    /// Path suffixes of resources that never carry text
    pub skip_extensions: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            stale_years: (2012..2024).map(|year: u32| year.to_string()).collect(),
            noise_keywords: [
                "/news",
                "/events",
                "/announcements",
                "/whats-happening-tedu",
                "/gundemde-neler-var",
                "/duyurular",
                "/etkinlikler",
                "/node/",
                "/agenda/",
                "/blog",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            skip_extensions: [
                ".jpg", ".jpeg", ".png", ".gif", ".svg", ".ico", ".webp", ".css", ".js", ".woff",
                ".woff2", ".zip", ".rar", ".mp4", ".avi", ".mov",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Sorted URL list written by the discovery pass
    pub url_map_path: PathBuf,

    /// Raw corpus written by the extraction pass
    pub raw_corpus_path: PathBuf,

    /// Cleaned corpus written by the normalization pass
    pub final_corpus_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            url_map_path: PathBuf::from("tedu_url_map_clean.txt"),
            raw_corpus_path: PathBuf::from("tedu_final_data.txt"),
            final_corpus_path: PathBuf::from("tedu_clean_data_final.txt"),
        }
    }
}

/// How a junk rule cuts text once its pattern matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JunkMode {
    /// Remove the first match and everything after it
    #[default]
    TruncateFrom,
    /// Remove every match, keeping the surrounding text
    Remove,
}

/// One entry of the junk rule table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JunkRuleConfig {
    /// Regular expression, matched case-insensitively with `.` spanning lines
    pub pattern: String,

    #[serde(default)]
    pub mode: JunkMode,
}

impl JunkRuleConfig {
    fn truncate_from(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            mode: JunkMode::TruncateFrom,
        }
    }
}

/// Text normalizer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NormalizerConfig {
    /// Minimum text length (characters) for a block to be kept, at
    /// extraction and at normalization alike
    pub min_text_length: usize,

    /// Ordered junk rule table
    pub junk: Vec<JunkRuleConfig>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            junk: [
                "Skip to main content",
                r"What are you looking for\?",
                "MyTEDU Portal",
                "Copyright ©",
                "Follow the Tedu Computer Engineering:",
                "Access denied",
                "You are not authorized",
                r"Ankara - Turkeyinfo@tedu\.edu\.tr",
                "Page not found",
                "Apache2 Ubuntu Default Page",
                "Welcome to nginx",
            ]
            .iter()
            .map(|pattern| JunkRuleConfig::truncate_from(pattern))
            .collect(),
        }
    }
}
