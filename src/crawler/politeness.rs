//! Per-host request pacing and crawl interruption
//!
//! This module handles:
//! - Spacing requests to the same host by a minimum delay
//! - Spacing every request when the crawl runs sequentially
//! - The shared cancellation flag set by Ctrl-C

use crate::url::host_key;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

/// Spaces requests to each host by at least `min_delay`
///
/// A worker calls [`acquire`](Self::acquire) before fetching and
/// [`release`](Self::release) afterwards. Acquire reserves the next free
/// slot for the host, so concurrent workers never start within
/// `min_delay` of each other. Release pushes the next slot to
/// `min_delay` after the response, so a sequential crawl sleeps the full
/// delay between one response and the next request.
///
/// A [`sequential`](Self::sequential) limiter paces every URL under one
/// shared key, so successive fetches are spaced even across subdomains.
#[derive(Debug)]
pub struct HostRateLimiter {
    min_delay: Duration,
    per_host: bool,

    /// Earliest instant at which each host may be requested again
    next_slot: Mutex<HashMap<String, Instant>>,
}

impl HostRateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            per_host: true,
            next_slot: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a limiter that spaces all requests, regardless of host
    pub fn sequential(min_delay: Duration) -> Self {
        Self {
            per_host: false,
            ..Self::new(min_delay)
        }
    }

    /// Key under which requests to `url` are paced
    pub fn key(&self, url: &Url) -> String {
        if self.per_host {
            host_key(url).unwrap_or_default()
        } else {
            String::new()
        }
    }

    /// Reserves a request slot for `host` and returns how long to wait for it
    pub fn reserve(&self, host: &str, now: Instant) -> Duration {
        if self.min_delay.is_zero() {
            return Duration::ZERO;
        }

        let mut slots = self.next_slot.lock().unwrap_or_else(|e| e.into_inner());
        let slot = slots
            .get(host)
            .copied()
            .filter(|slot| *slot > now)
            .unwrap_or(now);
        slots.insert(host.to_string(), slot + self.min_delay);
        slot - now
    }

    /// Waits until `host` may be requested
    pub async fn acquire(&self, host: &str) {
        let wait = self.reserve(host, Instant::now());
        if !wait.is_zero() {
            tracing::trace!("Waiting {:?} before requesting {}", wait, host);
            tokio::time::sleep(wait).await;
        }
    }

    /// Records that a request to `host` has finished
    pub fn release(&self, host: &str) {
        self.release_at(host, Instant::now());
    }

    fn release_at(&self, host: &str, now: Instant) {
        if self.min_delay.is_zero() {
            return;
        }

        let mut slots = self.next_slot.lock().unwrap_or_else(|e| e.into_inner());
        let after_response = now + self.min_delay;
        let slot = slots.entry(host.to_string()).or_insert(after_response);
        if *slot < after_response {
            *slot = after_response;
        }
    }
}

/// Cancellation flag shared by the coordinator and the signal handler
///
/// Once cancelled, coordinators stop handing out new URLs, wait for
/// in-flight fetches, and still write their output files.
#[derive(Debug, Clone, Default)]
pub struct CrawlControl {
    cancelled: Arc<AtomicBool>,
}

impl CrawlControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Spawns a task that cancels the crawl on Ctrl-C
    pub fn cancel_on_ctrl_c(&self) -> tokio::task::JoinHandle<()> {
        let control = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::warn!("Interrupt received, finishing in-flight requests");
                    control.cancel();
                }
                Err(e) => tracing::error!("Failed to listen for Ctrl-C: {}", e),
            }
        })
    }
}
