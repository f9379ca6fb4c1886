//! Configuration module for Campus-Corpus
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a built-in default, so `Config::default()` is a complete,
//! valid configuration for the TEDU crawl.
//!
//! # Example
//!
//! ```no_run
//! use campus_corpus::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("campus.toml")).unwrap();
//! println!("Crawler will visit at most {} URLs", config.crawler.max_urls);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FilterConfig, JunkMode, JunkRuleConfig, NormalizerConfig,
    OutputConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
