//! Per-URL outcomes recorded by the crawl passes
//!
//! Every URL a pass dequeues ends in exactly one of these outcomes.

use std::fmt;

/// What happened to a single URL during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageOutcome {
    // ===== Success States =====
    /// Discovery: page fetched and its links harvested
    Mapped,

    /// Extraction: text accepted into the corpus
    Extracted,

    // ===== Skip States =====
    /// Extraction: text shorter than the minimum length
    TooShort,

    /// Fetched resource is neither HTML nor PDF
    Unsupported,

    /// Extraction produced no text (parse failure or empty document)
    Empty,

    // ===== Error States =====
    /// Server answered with a non-2xx status
    HttpError,

    /// Timeout, connection failure, or body read failure
    NetworkError,
}

impl PageOutcome {
    /// All outcomes, in report order
    pub const ALL: [PageOutcome; 7] = [
        Self::Mapped,
        Self::Extracted,
        Self::TooShort,
        Self::Unsupported,
        Self::Empty,
        Self::HttpError,
        Self::NetworkError,
    ];

    /// Returns true if the fetch itself failed
    pub fn is_error(&self) -> bool {
        matches!(self, Self::HttpError | Self::NetworkError)
    }

    /// Short label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mapped => "mapped",
            Self::Extracted => "extracted",
            Self::TooShort => "too_short",
            Self::Unsupported => "unsupported_type",
            Self::Empty => "empty",
            Self::HttpError => "http_error",
            Self::NetworkError => "network_error",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
