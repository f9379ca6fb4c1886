//! Integration tests for the three passes
//!
//! These tests use wiremock to stand in for the university website and
//! run the discovery, extraction and cleaning passes end to end against
//! temporary output files.

mod common;
mod crawl_tests;
mod ingest_tests;
mod pipeline_tests;
