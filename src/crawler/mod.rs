//! Crawler module for the discovery and extraction passes
//!
//! This module contains the network side of the pipeline, including:
//! - HTTP fetching with per-pass timeouts
//! - HTML link extraction
//! - The breadth-first frontier
//! - Per-host rate limiting and interrupt handling
//! - Overall pass coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod politeness;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use frontier::Frontier;
pub use parser::extract_links;
pub use politeness::{CrawlControl, HostRateLimiter};
