//! Text repair primitives

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").expect("valid regex"));

// Lowercase then uppercase, optionally across one sentence mark. The
// classes spell out the Turkish letters so dotless ı and dotted İ count.
static MERGED_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zçğıöşüâîû])([.!?]?)([A-ZÇĞİÖŞÜÂÎÛ])").expect("valid regex")
});

/// Collapses every whitespace run (spaces, tabs, line breaks) to one space and trims
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Joins hard-wrapped lines back into paragraphs
///
/// A double line break is a real paragraph break; any other line break is
/// a wrapping artifact and becomes a space. Space runs are then collapsed.
///
/// ```
/// use campus_corpus::normalize::unwrap_lines;
///
/// assert_eq!(
///     unwrap_lines("Hello\nworld.\n\nNext paragraph."),
///     "Hello world.\n\nNext paragraph."
/// );
/// ```
pub fn unwrap_lines(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let joined = text
        .split("\n\n")
        .map(|paragraph| paragraph.replace('\n', " "))
        .collect::<Vec<_>>()
        .join("\n\n");

    SPACES_RE.replace_all(&joined, " ").trim().to_string()
}

/// Inserts the space lost between a lowercase and an uppercase letter
///
/// Handles both `wordNext` and `word.Next`; runs of capitals are untouched.
///
/// ```
/// use campus_corpus::normalize::repair_merged_words;
///
/// assert_eq!(repair_merged_words("yılmaz.Bilgisayar"), "yılmaz. Bilgisayar");
/// assert_eq!(repair_merged_words("ALLCAPS"), "ALLCAPS");
/// ```
pub fn repair_merged_words(text: &str) -> String {
    MERGED_WORD_RE.replace_all(text, "${1}${2} ${3}").into_owned()
}
