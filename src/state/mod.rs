//! State tracking for crawl passes
//!
//! This module defines the outcome each URL reaches during a pass.

mod outcome;

pub use outcome::PageOutcome;
