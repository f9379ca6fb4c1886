//! Content extraction
//!
//! Turns fetched bytes into plain text. The declared Content-Type decides
//! the extractor:
//! - `application/pdf` → [`extract_pdf`]
//! - `text/html` → [`extract_html`]
//! - anything else → no text
//!
//! Extraction never fails loudly: a document that cannot be parsed simply
//! yields [`Extraction::Empty`] and the crawl moves on.

mod html;
mod pdf;

pub use html::{decode_html, extract_html};
pub use pdf::extract_pdf;

use crate::corpus::SourceKind;

/// Result of extracting one fetched resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Non-empty plain text, whitespace already collapsed
    Text { kind: SourceKind, text: String },

    /// The extractor ran but produced nothing
    Empty { kind: SourceKind },

    /// Content-Type is neither HTML nor PDF
    Unsupported,
}

/// Extracts text according to the declared Content-Type
///
/// # Example
///
/// ```
/// use campus_corpus::extract::{extract, Extraction};
/// use campus_corpus::SourceKind;
///
/// let html = b"<html><body><nav>Menu</nav><p>Welcome  to\n TEDU</p></body></html>";
/// assert_eq!(
///     extract(html, "text/html; charset=utf-8"),
///     Extraction::Text { kind: SourceKind::Web, text: "Welcome to TEDU".to_string() }
/// );
/// assert_eq!(extract(b"GIF89a", "image/gif"), Extraction::Unsupported);
/// ```
pub fn extract(bytes: &[u8], content_type: &str) -> Extraction {
    let Some(kind) = SourceKind::from_content_type(content_type) else {
        return Extraction::Unsupported;
    };

    let text = match kind {
        SourceKind::Pdf => extract_pdf(bytes),
        SourceKind::Web => extract_html(bytes, content_type),
    };

    if text.is_empty() {
        Extraction::Empty { kind }
    } else {
        Extraction::Text { kind, text }
    }
}
