//! Buffered corpus writer with the minimum-length gate

use super::SourceBlock;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Appends source blocks to a corpus file
///
/// Blocks are written in the order they are offered. Nothing is sorted or
/// deduplicated here.
pub struct CorpusWriter<W: Write> {
    inner: BufWriter<W>,
    min_text_length: usize,
    written: usize,
    rejected: usize,
}

impl CorpusWriter<File> {
    /// Creates (or truncates) a corpus file
    pub fn create(path: &Path, min_text_length: usize) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?, min_text_length))
    }
}

impl<W: Write> CorpusWriter<W> {
    pub fn new(inner: W, min_text_length: usize) -> Self {
        Self {
            inner: BufWriter::new(inner),
            min_text_length,
            written: 0,
            rejected: 0,
        }
    }

    /// Writes the block if its text is longer than the minimum length
    ///
    /// Returns whether the block was written. Short blocks are usually
    /// error pages or access-denied stubs.
    pub fn accept(&mut self, block: &SourceBlock) -> io::Result<bool> {
        if block.char_len() <= self.min_text_length {
            self.rejected += 1;
            return Ok(false);
        }

        self.write_block(block)?;
        Ok(true)
    }

    /// Writes the block without the length gate
    pub fn write_block(&mut self, block: &SourceBlock) -> io::Result<()> {
        self.inner.write_all(block.render().as_bytes())?;
        self.written += 1;
        Ok(())
    }

    /// Number of blocks written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Number of blocks refused by [`accept`](Self::accept)
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Flushes buffered blocks and returns the underlying writer
    pub fn finish(self) -> io::Result<W> {
        self.inner.into_inner().map_err(|e| e.into_error())
    }
}
