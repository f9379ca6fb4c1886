//! Crawler coordinator - pass orchestration
//!
//! This module drives the two network passes through a bounded worker pool:
//! - Discovery: breadth-first crawl of the target domain, writing the URL map
//! - Extraction: fetch every mapped URL, writing the raw corpus
//!
//! Workers only fetch and parse. The coordinator loop owns the frontier and
//! the corpus writer, so all bookkeeping happens on one task.

use crate::config::Config;
use crate::corpus::{read_url_map, write_url_map, CorpusWriter, SourceBlock};
use crate::crawler::{
    build_http_client, extract_links, fetch_url, CrawlControl, FetchResult, Frontier,
    HostRateLimiter,
};
use crate::extract::{decode_html, extract, Extraction};
use crate::output::{IngestReport, MapReport, OutcomeCounts};
use crate::state::PageOutcome;
use crate::url::{normalize_url, UrlFilter};
use crate::Result;
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    filter: UrlFilter,
    control: CrawlControl,
}

/// What a discovery worker reports back
struct MappedPage {
    url: Url,
    outcome: PageOutcome,
    links: Vec<Url>,
}

/// What an extraction worker reports back
struct IngestedPage {
    url: String,
    result: std::result::Result<Extraction, PageOutcome>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `control` - Interrupt flag checked before every new fetch
    pub fn new(config: Config, control: CrawlControl) -> Result<Self> {
        let client = build_http_client(&config.user_agent)?;
        let filter = UrlFilter::from_config(&config);

        Ok(Self {
            config: Arc::new(config),
            client,
            filter,
            control,
        })
    }

    fn concurrency(&self) -> usize {
        self.config.crawler.max_concurrent_fetches.max(1)
    }

    fn progress_interval(&self) -> usize {
        self.config.crawler.progress_interval.max(1)
    }

    /// A single worker paces every fetch, several workers pace per host
    fn limiter(&self, delay: Duration) -> Arc<HostRateLimiter> {
        let limiter = if self.concurrency() == 1 {
            HostRateLimiter::sequential(delay)
        } else {
            HostRateLimiter::new(delay)
        };
        Arc::new(limiter)
    }

    /// Runs the discovery pass and writes the URL map
    ///
    /// This method:
    /// 1. Seeds the frontier from configuration
    /// 2. Fetches pages breadth-first, at most `max_urls` of them
    /// 3. Filters discovered links and feeds them back into the frontier
    /// 4. Writes every visited URL, sorted, to the URL map
    ///
    /// The URL map is written even when the pass is interrupted.
    pub async fn map(&self) -> Result<MapReport> {
        let started_at = Utc::now();
        let crawler = &self.config.crawler;
        let limiter = self.limiter(crawler.discovery_delay());

        let seeds = crawler.seeds.iter().filter_map(|seed| match normalize_url(seed) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("Skipping seed {}: {}", seed, e);
                None
            }
        });
        let mut frontier = Frontier::new(crawler.max_urls);
        let seeded = frontier.seed(seeds);

        tracing::info!(
            "Mapping {} from {} seeds (limit {} URLs)",
            crawler.target_domain,
            seeded,
            crawler.max_urls
        );

        let mut tasks = JoinSet::new();
        let mut outcomes = OutcomeCounts::default();

        loop {
            if !self.control.is_cancelled() {
                while tasks.len() < self.concurrency() {
                    let Some(url) = frontier.next() else {
                        break;
                    };

                    let visited = frontier.visited_count();
                    if visited % self.progress_interval() == 0 {
                        tracing::info!(
                            "Progress: {} URLs mapped, {} queued - {}",
                            visited,
                            frontier.queue_len(),
                            url
                        );
                    }

                    tasks.spawn(map_page(
                        self.client.clone(),
                        Arc::clone(&limiter),
                        url,
                        crawler.discovery_timeout(),
                    ));
                }
            }

            // Empty once the frontier is exhausted and all workers are drained
            let Some(joined) = tasks.join_next().await else {
                break;
            };

            match joined {
                Ok(page) => {
                    outcomes.record(page.outcome);

                    let found = page.links.len();
                    let admitted = page
                        .links
                        .into_iter()
                        .filter(|link| self.filter.admissible(link.as_str()))
                        .filter(|link| frontier.enqueue(link.clone()))
                        .count();
                    tracing::debug!("{}: {} links, {} new", page.url, found, admitted);
                }
                Err(e) => tracing::error!("Discovery worker failed: {}", e),
            }
        }

        let interrupted = self.control.is_cancelled();
        let queue_remaining = frontier.queue_len();
        let urls = frontier.into_sorted_urls();

        let path = &self.config.output.url_map_path;
        let urls_mapped = write_url_map(path, &urls)?;
        tracing::info!("Wrote {} URLs to {}", urls_mapped, path.display());

        Ok(MapReport {
            started_at,
            finished_at: Utc::now(),
            urls_mapped,
            queue_remaining,
            interrupted,
            outcomes,
        })
    }

    /// Runs the extraction pass and writes the raw corpus
    ///
    /// Fails with [`HarvestError::MissingInput`](crate::HarvestError::MissingInput)
    /// before touching the raw corpus if the URL map does not exist.
    pub async fn ingest(&self) -> Result<IngestReport> {
        let started_at = Utc::now();
        let crawler = &self.config.crawler;
        let output = &self.config.output;

        let urls = read_url_map(&output.url_map_path)?;
        let urls_total = urls.len();
        tracing::info!(
            "Ingesting {} URLs from {}",
            urls_total,
            output.url_map_path.display()
        );

        let limiter = self.limiter(crawler.request_delay());
        let mut writer = CorpusWriter::create(
            &output.raw_corpus_path,
            self.config.normalizer.min_text_length,
        )?;

        let mut pending = urls.into_iter().enumerate();
        let mut tasks = JoinSet::new();
        let mut outcomes = OutcomeCounts::default();
        let mut pages_processed = 0;

        loop {
            if !self.control.is_cancelled() {
                while tasks.len() < self.concurrency() {
                    let Some((index, url)) = pending.next() else {
                        break;
                    };

                    if (index + 1) % self.progress_interval() == 0 {
                        tracing::info!("Processing [{}/{}] - {}", index + 1, urls_total, url);
                    }

                    tasks.spawn(ingest_page(
                        self.client.clone(),
                        Arc::clone(&limiter),
                        url,
                        crawler.extraction_timeout(),
                    ));
                }
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };

            let page = match joined {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!("Extraction worker failed: {}", e);
                    continue;
                }
            };
            pages_processed += 1;

            let outcome = match page.result {
                Err(outcome) => outcome,
                Ok(Extraction::Unsupported) => PageOutcome::Unsupported,
                Ok(Extraction::Empty { .. }) => PageOutcome::Empty,
                Ok(Extraction::Text { kind, text }) => {
                    let block = SourceBlock::new(kind, page.url, text);
                    if writer.accept(&block)? {
                        PageOutcome::Extracted
                    } else {
                        tracing::debug!("Too little text on {}", block.url);
                        PageOutcome::TooShort
                    }
                }
            };
            outcomes.record(outcome);
        }

        let blocks_written = writer.written();
        let rejected = writer.rejected();
        writer.finish()?;
        tracing::info!(
            "Wrote {} blocks to {} ({} too short)",
            blocks_written,
            output.raw_corpus_path.display(),
            rejected
        );

        Ok(IngestReport {
            started_at,
            finished_at: Utc::now(),
            urls_total,
            pages_processed,
            blocks_written,
            interrupted: self.control.is_cancelled(),
            outcomes,
        })
    }
}

/// Fetches one page for the discovery pass and collects its links
///
/// Only HTML responses are parsed for links. Anything else that answers
/// with a success status still counts as mapped.
async fn map_page(
    client: Client,
    limiter: Arc<HostRateLimiter>,
    url: Url,
    timeout: Duration,
) -> MappedPage {
    let key = limiter.key(&url);
    limiter.acquire(&key).await;
    let fetched = fetch_url(&client, url.as_str(), timeout).await;
    limiter.release(&key);

    match fetched {
        FetchResult::Success {
            final_url,
            content_type,
            body,
            ..
        } => {
            let links = if content_type.contains("text/html") {
                // Relative links resolve against where the redirect chain ended
                let base = Url::parse(&final_url).unwrap_or_else(|_| url.clone());
                extract_links(&decode_html(&body, &content_type), &base)
            } else {
                Vec::new()
            };

            MappedPage {
                url,
                outcome: PageOutcome::Mapped,
                links,
            }
        }
        FetchResult::HttpError { status_code } => {
            tracing::debug!("HTTP {} while mapping {}", status_code, url);
            MappedPage {
                url,
                outcome: PageOutcome::HttpError,
                links: Vec::new(),
            }
        }
        FetchResult::NetworkError { error, timed_out } => {
            if timed_out {
                tracing::debug!("Timed out after {:?} mapping {}", timeout, url);
            } else {
                tracing::debug!("Failed to map {}: {}", url, error);
            }
            MappedPage {
                url,
                outcome: PageOutcome::NetworkError,
                links: Vec::new(),
            }
        }
    }
}

/// Fetches one mapped URL and extracts its text
async fn ingest_page(
    client: Client,
    limiter: Arc<HostRateLimiter>,
    url: String,
    timeout: Duration,
) -> IngestedPage {
    let key = Url::parse(&url)
        .map(|parsed| limiter.key(&parsed))
        .unwrap_or_default();
    limiter.acquire(&key).await;
    let fetched = fetch_url(&client, &url, timeout).await;
    limiter.release(&key);

    let result = match fetched {
        FetchResult::Success {
            content_type, body, ..
        } => {
            // PDF parsing is CPU-bound
            match tokio::task::spawn_blocking(move || extract(&body, &content_type)).await {
                Ok(extraction) => Ok(extraction),
                Err(e) => {
                    tracing::warn!("Extraction failed for {}: {}", url, e);
                    Err(PageOutcome::Empty)
                }
            }
        }
        FetchResult::HttpError { status_code } => {
            tracing::warn!("HTTP {} for {}", status_code, url);
            Err(PageOutcome::HttpError)
        }
        FetchResult::NetworkError { error, timed_out } => {
            if timed_out {
                tracing::warn!("Timed out after {:?} on {}", timeout, url);
            } else {
                tracing::warn!("Error on {}: {}", url, error);
            }
            Err(PageOutcome::NetworkError)
        }
    };

    IngestedPage { url, result }
}
