//! Breadth-first crawl frontier
//!
//! This module handles:
//! - FIFO ordering of URLs waiting to be fetched
//! - Deduplication against both visited and queued URLs
//! - The `max_urls` cap on distinct visited URLs
//! - The discovery-ordered list of visited URLs

use std::collections::{HashSet, VecDeque};
use url::Url;

/// BFS frontier owned by the discovery coordinator
///
/// A URL is admitted at most once per crawl. Admission stops once
/// `visited + queued` reaches the cap, so the queue never holds URLs that
/// could not be visited anyway.
#[derive(Debug)]
pub struct Frontier {
    /// URLs waiting to be fetched, in discovery order
    queue: VecDeque<Url>,

    /// Keys of URLs currently in `queue`
    queued: HashSet<String>,

    /// Keys of URLs already handed out by [`next`](Self::next)
    visited: HashSet<String>,

    /// Visited URLs in the order they were handed out
    discovered: Vec<String>,

    max_urls: usize,
}

impl Frontier {
    pub fn new(max_urls: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
            discovered: Vec::new(),
            max_urls,
        }
    }

    /// Queues seed URLs in order, returning how many were admitted
    pub fn seed(&mut self, seeds: impl IntoIterator<Item = Url>) -> usize {
        seeds
            .into_iter()
            .filter(|url| self.enqueue(url.clone()))
            .count()
    }

    /// Adds a URL to the back of the queue
    ///
    /// Returns false if the URL was already visited or queued, or if the
    /// frontier is full.
    pub fn enqueue(&mut self, url: Url) -> bool {
        let key = url.as_str();
        if self.visited.contains(key) || self.queued.contains(key) {
            return false;
        }

        if self.visited.len() + self.queue.len() >= self.max_urls {
            return false;
        }

        self.queued.insert(key.to_string());
        self.queue.push_back(url);
        true
    }

    /// Takes the oldest queued URL and marks it visited
    ///
    /// Returns None once the queue is empty or the cap is reached.
    pub fn next(&mut self) -> Option<Url> {
        if self.visited.len() >= self.max_urls {
            return None;
        }

        let url = self.queue.pop_front()?;
        let key = url.as_str().to_string();
        self.queued.remove(&key);
        self.visited.insert(key.clone());
        self.discovered.push(key);
        Some(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Consumes the frontier, returning visited URLs sorted lexicographically
    pub fn into_sorted_urls(self) -> Vec<String> {
        let mut urls = self.discovered;
        urls.sort();
        urls
    }
}
