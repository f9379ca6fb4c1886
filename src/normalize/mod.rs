//! Corpus normalization
//!
//! The second pass over a raw corpus. Each block goes through, in order:
//!
//! 1. Junk removal (menus, footers, error and landing pages)
//! 2. Line unwrap (hard wraps become spaces, paragraph breaks survive)
//! 3. Merged-word repair (`end.Start` → `end. Start`)
//! 4. Whitespace collapse
//! 5. Length filter
//!
//! Junk goes first so that boilerplate is never repaired into sentences.

mod junk;
mod text;

pub use junk::{JunkRule, JunkTable};
pub use text::{collapse_whitespace, repair_merged_words, unwrap_lines};

use crate::config::NormalizerConfig;
use crate::corpus::{parse_corpus, CorpusWriter, SourceBlock};
use crate::output::CleanReport;
use crate::{ConfigResult, HarvestError, Result};
use std::fs;
use std::path::Path;

/// Block-level text normalizer
#[derive(Debug, Clone)]
pub struct Normalizer {
    junk: JunkTable,
    min_text_length: usize,
}

impl Normalizer {
    pub fn new(junk: JunkTable, min_text_length: usize) -> Self {
        Self {
            junk,
            min_text_length,
        }
    }

    /// Builds a normalizer from configuration, compiling the junk table
    pub fn from_config(config: &NormalizerConfig) -> ConfigResult<Self> {
        Ok(Self::new(
            JunkTable::compile(&config.junk)?,
            config.min_text_length,
        ))
    }

    /// Runs the four repair stages over one text
    pub fn clean_text(&self, text: &str) -> String {
        let text = self.junk.strip(text);
        let text = unwrap_lines(&text);
        let text = repair_merged_words(&text);
        collapse_whitespace(&text)
    }

    /// Cleans a block, or returns None if too little text remains
    pub fn normalize_block(&self, block: &SourceBlock) -> Option<SourceBlock> {
        let text = self.clean_text(&block.text);

        if text.chars().count() < self.min_text_length {
            return None;
        }

        Some(SourceBlock::new(block.kind, block.url.clone(), text))
    }

    /// Cleans a whole corpus, keeping block order
    pub fn normalize_corpus(&self, blocks: &[SourceBlock]) -> (Vec<SourceBlock>, CleanReport) {
        let mut kept = Vec::with_capacity(blocks.len());
        let mut report = CleanReport::default();

        for block in blocks {
            report.processed += 1;
            match self.normalize_block(block) {
                Some(cleaned) => kept.push(cleaned),
                None => {
                    tracing::debug!("Dropping short block from {}", block.url);
                    report.dropped += 1;
                }
            }
        }

        report.kept = kept.len();
        (kept, report)
    }

    /// Reads a raw corpus file, cleans it, and writes the final corpus
    ///
    /// Invalid UTF-8 in the input is replaced rather than rejected. Fails
    /// with [`HarvestError::MissingInput`] before creating `output` if
    /// `input` does not exist.
    pub fn clean_file(&self, input: &Path, output: &Path) -> Result<CleanReport> {
        if !input.exists() {
            return Err(HarvestError::MissingInput {
                path: input.to_path_buf(),
            });
        }

        let raw = fs::read(input)?;
        let content = String::from_utf8_lossy(&raw);
        let blocks = parse_corpus(&content);
        tracing::info!("Parsed {} blocks from {}", blocks.len(), input.display());
        if self.junk.is_empty() {
            tracing::warn!("No junk rules configured");
        } else {
            tracing::debug!("Applying {} junk rules", self.junk.len());
        }

        let (kept, report) = self.normalize_corpus(&blocks);

        let mut writer = CorpusWriter::create(output, self.min_text_length)?;
        for block in &kept {
            writer.write_block(block)?;
        }
        writer.finish()?;

        tracing::info!("Wrote {} blocks to {}", report.kept, output.display());
        Ok(report)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&NormalizerConfig::default())
            .expect("built-in junk patterns compile")
    }
}
