//! HTML text extraction

use crate::normalize::collapse_whitespace;
use encoding_rs::{Encoding, UTF_8};
use scraper::{Html, Selector};
use std::borrow::Cow;

/// Elements that are removed from the tree before text is collected
const BOILERPLATE: &str = "script, style, nav, footer, header, aside, form";

/// Decodes an HTML body using the charset declared in its Content-Type
///
/// Unknown or missing charsets fall back to UTF-8. A byte order mark
/// overrides the declared charset. Undecodable bytes become U+FFFD.
///
/// # Example
///
/// ```
/// use campus_corpus::extract::decode_html;
///
/// let bytes = b"\xd6\xf0renci \xdd\xfeleri";
/// assert_eq!(decode_html(bytes, "text/html; charset=windows-1254"), "Öğrenci İşleri");
/// ```
pub fn decode_html<'a>(bytes: &'a [u8], content_type: &str) -> Cow<'a, str> {
    let encoding = declared_charset(content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!("Malformed {} bytes replaced while decoding", used.name());
    }
    text
}

/// Value of the `charset` parameter of a Content-Type header
fn declared_charset(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}

/// Extracts the visible text of an HTML document
///
/// The body is decoded with [`decode_html`] first. Boilerplate elements
/// (script, style, nav, footer, header, aside, form) are then detached
/// from the parsed tree together with their subtrees. The remaining text
/// nodes are concatenated and every whitespace run is collapsed to a
/// single space.
///
/// The HTML parser is error-tolerant, so malformed markup still yields
/// whatever text it contains.
pub fn extract_html(bytes: &[u8], content_type: &str) -> String {
    let source = decode_html(bytes, content_type);
    let mut document = Html::parse_document(&source);

    if let Ok(selector) = Selector::parse(BOILERPLATE) {
        let boilerplate: Vec<_> = document.select(&selector).map(|element| element.id()).collect();

        for id in boilerplate {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }
    }

    let text: String = document.root_element().text().collect();
    collapse_whitespace(&text)
}
