//! Corpus file format
//!
//! A corpus is a sequence of tagged source blocks:
//!
//! ```text
//! --- WEB_SOURCE: https://cmpe.tedu.edu.tr/en ---
//! <text>
//!
//! ```
//!
//! The header line is the only delimiter; [`parse_corpus`] re-segments a file
//! by matching it, so the format round-trips without an index.

mod urlmap;
mod writer;

pub use urlmap::{read_url_map, write_url_map};
pub use writer::CorpusWriter;

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Where a block's text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// An HTML page
    Web,
    /// A PDF document
    Pdf,
}

impl SourceKind {
    /// Tag used in the block header (`WEB` or `PDF`)
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Web => "WEB",
            Self::Pdf => "PDF",
        }
    }

    /// Parses a header tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "WEB" => Some(Self::Web),
            "PDF" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Picks the extractor for a declared Content-Type header
    ///
    /// Matching is a case-insensitive containment check, so parameters such
    /// as `; charset=utf-8` are ignored. Anything that is neither PDF nor
    /// HTML returns None.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("application/pdf") {
            Some(Self::Pdf)
        } else if content_type.contains("text/html") {
            Some(Self::Web)
        } else {
            None
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One extracted document and its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlock {
    pub kind: SourceKind,
    pub url: String,
    pub text: String,
}

impl SourceBlock {
    pub fn new(kind: SourceKind, url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            text: text.into(),
        }
    }

    /// The header line, without its trailing newline
    pub fn header(&self) -> String {
        format!("--- {}_SOURCE: {} ---", self.kind.tag(), self.url)
    }

    /// Text length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Serializes the block: header, text, blank line
    pub fn render(&self) -> String {
        format!("{}\n{}\n\n", self.header(), self.text)
    }
}

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^--- (WEB|PDF)_SOURCE: (.+?) ---\r?$").expect("valid regex"));

/// Splits a corpus file back into its blocks
///
/// Anything before the first header is ignored. Each block's text is the
/// content between its header line and the next header, without the
/// framing newlines. Both LF and CRLF line endings are accepted.
pub fn parse_corpus(content: &str) -> Vec<SourceBlock> {
    let headers: Vec<_> = HEADER_RE.captures_iter(content).collect();
    let mut blocks = Vec::with_capacity(headers.len());

    for (i, captures) in headers.iter().enumerate() {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let body_end = headers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(content.len(), |next| next.start());

        let body = &content[whole.end()..body_end];
        let body = body
            .strip_prefix("\r\n")
            .or_else(|| body.strip_prefix('\n'))
            .unwrap_or(body);
        let text = body.trim_end_matches(['\r', '\n']);

        // The regex only admits known tags
        let Some(kind) = SourceKind::from_tag(&captures[1]) else {
            continue;
        };

        blocks.push(SourceBlock::new(kind, &captures[2], text));
    }

    blocks
}
