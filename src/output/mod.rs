//! Output module for pass reports
//!
//! This module handles:
//! - Counting per-URL outcomes during a pass
//! - Summarizing each pass
//! - Printing the summaries to the console

pub mod stats;

pub use stats::{
    print_clean_report, print_ingest_report, print_map_report, CleanReport, IngestReport,
    MapReport, OutcomeCounts,
};
