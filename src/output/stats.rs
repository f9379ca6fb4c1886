//! Pass statistics
//!
//! Each pass produces a report that is printed to stdout when it finishes.

use crate::state::PageOutcome;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Per-outcome page counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    counts: HashMap<PageOutcome, usize>,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: PageOutcome) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    pub fn get(&self, outcome: PageOutcome) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Total number of pages recorded
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of pages whose fetch failed
    pub fn errors(&self) -> usize {
        self.counts
            .iter()
            .filter(|(outcome, _)| outcome.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Non-zero counters in report order
    pub fn non_zero(&self) -> Vec<(PageOutcome, usize)> {
        PageOutcome::ALL
            .iter()
            .map(|outcome| (*outcome, self.get(*outcome)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

/// Summary of a discovery pass
#[derive(Debug, Clone)]
pub struct MapReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Distinct URLs visited and written to the URL map
    pub urls_mapped: usize,
    /// URLs still queued when the pass stopped
    pub queue_remaining: usize,
    pub interrupted: bool,
    pub outcomes: OutcomeCounts,
}

/// Summary of an extraction pass
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// URLs listed in the input map
    pub urls_total: usize,
    /// URLs actually fetched
    pub pages_processed: usize,
    /// Blocks written to the raw corpus
    pub blocks_written: usize,
    pub interrupted: bool,
    pub outcomes: OutcomeCounts,
}

/// Summary of a normalization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub processed: usize,
    pub dropped: usize,
    pub kept: usize,
}

fn elapsed_seconds(started: DateTime<Utc>, finished: DateTime<Utc>) -> f64 {
    (finished - started).num_milliseconds() as f64 / 1000.0
}

fn print_outcomes(outcomes: &OutcomeCounts) {
    let total = outcomes.total();
    if total == 0 {
        return;
    }

    println!("Pages by Outcome:");
    for (outcome, count) in outcomes.non_zero() {
        let percentage = (count as f64 / total as f64) * 100.0;
        println!("  {}: {} ({:.1}%)", outcome, count, percentage);
    }

    let errors = outcomes.errors();
    if errors > 0 {
        println!("Failed fetches: {}", errors);
    }
}

/// Prints a discovery pass summary
pub fn print_map_report(report: &MapReport) {
    println!("=== URL Map ===\n");
    println!(
        "Started: {}  ({:.1}s)",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        elapsed_seconds(report.started_at, report.finished_at)
    );
    if report.interrupted {
        println!("Stopped early by interrupt");
    }
    println!("URLs mapped: {}", report.urls_mapped);
    println!("Still queued: {}", report.queue_remaining);
    print_outcomes(&report.outcomes);
    println!();
}

/// Prints an extraction pass summary
pub fn print_ingest_report(report: &IngestReport) {
    println!("=== Ingestion ===\n");
    println!(
        "Started: {}  ({:.1}s)",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        elapsed_seconds(report.started_at, report.finished_at)
    );
    if report.interrupted {
        println!("Stopped early by interrupt");
    }
    println!(
        "Pages processed: {} / {}",
        report.pages_processed, report.urls_total
    );
    println!("Blocks written: {}", report.blocks_written);
    print_outcomes(&report.outcomes);
    println!();
}

/// Prints a normalization pass summary
pub fn print_clean_report(report: &CleanReport) {
    println!("=== Cleaning ===\n");
    println!("Total pages processed: {}", report.processed);
    println!("Junk pages dropped:    {}", report.dropped);
    println!("Valid pages kept:      {}", report.kept);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_counts() {
        let mut counts = OutcomeCounts::default();
        counts.record(PageOutcome::Extracted);
        counts.record(PageOutcome::Extracted);
        counts.record(PageOutcome::HttpError);
        counts.record(PageOutcome::NetworkError);
        counts.record(PageOutcome::TooShort);

        assert_eq!(counts.get(PageOutcome::Extracted), 2);
        assert_eq!(counts.get(PageOutcome::Mapped), 0);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.errors(), 2);
    }

    #[test]
    fn test_non_zero_in_report_order() {
        let mut counts = OutcomeCounts::default();
        counts.record(PageOutcome::NetworkError);
        counts.record(PageOutcome::Mapped);

        assert_eq!(
            counts.non_zero(),
            vec![(PageOutcome::Mapped, 1), (PageOutcome::NetworkError, 1)]
        );
    }

    #[test]
    fn test_elapsed_seconds() {
        let started = Utc::now();
        let finished = started + chrono::Duration::milliseconds(2500);
        assert_eq!(elapsed_seconds(started, finished), 2.5);
    }
}
