use crate::config::types::{
    Config, CrawlerConfig, FilterConfig, NormalizerConfig, OutputConfig, UserAgentConfig,
};
use crate::normalize::JunkTable;
use crate::ConfigError;
use url::Url;

/// Upper bound on the fetch worker pool
const MAX_CONCURRENT_FETCHES: usize = 64;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_filter_config(&config.filter)?;
    validate_output_config(&config.output)?;
    validate_normalizer_config(&config.normalizer)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.target_domain.trim().is_empty() {
        return Err(ConfigError::Validation(
            "target_domain cannot be empty".to_string(),
        ));
    }

    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    for seed in &config.seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use HTTP or HTTPS",
                seed
            )));
        }
    }

    if config.max_urls == 0 {
        return Err(ConfigError::Validation(
            "max_urls must be >= 1".to_string(),
        ));
    }

    if config.discovery_timeout_ms == 0 || config.extraction_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "request timeouts must be greater than 0ms".to_string(),
        ));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > MAX_CONCURRENT_FETCHES
    {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and {}, got {}",
            MAX_CONCURRENT_FETCHES, config.max_concurrent_fetches
        )));
    }

    if config.progress_interval == 0 {
        return Err(ConfigError::Validation(
            "progress_interval must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            config.crawler_name
        )));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates filter lists
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    let lists = [
        ("stale_years", &config.stale_years),
        ("noise_keywords", &config.noise_keywords),
        ("skip_extensions", &config.skip_extensions),
    ];

    // An empty token would match every URL and reject the whole site
    for (name, list) in lists {
        if list.iter().any(|token| token.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "{} cannot contain empty entries",
                name
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    let paths = [
        ("url_map_path", &config.url_map_path),
        ("raw_corpus_path", &config.raw_corpus_path),
        ("final_corpus_path", &config.final_corpus_path),
    ];

    for (name, path) in paths {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    if config.raw_corpus_path == config.final_corpus_path {
        return Err(ConfigError::Validation(
            "raw_corpus_path and final_corpus_path must differ".to_string(),
        ));
    }

    Ok(())
}

/// Validates normalizer configuration by compiling the junk table
fn validate_normalizer_config(config: &NormalizerConfig) -> Result<(), ConfigError> {
    JunkTable::compile(&config.junk)?;
    Ok(())
}
