//! PDF text extraction using pdf-extract.

use crate::normalize::collapse_whitespace;
use std::panic;

/// Extracts the text of every page of a PDF document
///
/// Pages come out in document order with whitespace collapsed, so page
/// breaks become single spaces. Extraction is all-or-nothing: any failure,
/// including a panic inside the PDF parser, yields an empty string rather
/// than partial text.
pub fn extract_pdf(bytes: &[u8]) -> String {
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => collapse_whitespace(&text),
        Ok(Err(e)) => {
            tracing::debug!("PDF extraction failed: {}", e);
            String::new()
        }
        Err(_) => {
            tracing::warn!("PDF parser panicked, treating document as empty");
            String::new()
        }
    }
}
