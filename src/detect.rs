//! Input classification and output sniffing.

use crate::parser::{Token, Tokenizer};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.4"

/// What kind of markup an input string holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    /// Empty or whitespace only
    Empty,
    /// Text without any tags
    PlainText,
    /// Tags, but no `<html>` element
    Fragment,
    /// A complete document with an `<html>` element
    Document,
}

impl std::fmt::Display for MarkupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MarkupKind::Empty => "empty",
            MarkupKind::PlainText => "plain text",
            MarkupKind::Fragment => "HTML fragment",
            MarkupKind::Document => "HTML document",
        };
        f.write_str(name)
    }
}

/// Classify an input string.
///
/// # Example
/// ```
/// use htmlpdf::detect::{detect_markup, MarkupKind};
///
/// assert_eq!(detect_markup("Hello world"), MarkupKind::PlainText);
/// assert_eq!(detect_markup("<p>Hi</p>"), MarkupKind::Fragment);
/// ```
pub fn detect_markup(html: &str) -> MarkupKind {
    if html.trim().is_empty() {
        return MarkupKind::Empty;
    }

    let mut saw_tag = false;
    for token in Tokenizer::new(html) {
        match token {
            Token::StartTag { name, .. } if name == "html" => return MarkupKind::Document,
            Token::StartTag { .. } | Token::EndTag { .. } => saw_tag = true,
            Token::Text(_) => {}
        }
    }

    if saw_tag || html.contains("<!") {
        MarkupKind::Fragment
    } else {
        MarkupKind::PlainText
    }
}

/// Extract the version from a PDF header (e.g. "1.4" from "%PDF-1.4").
pub fn pdf_version(data: &[u8]) -> Option<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return None;
    }

    let version = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    if version[0].is_ascii_digit() && version[1] == b'.' && version[2].is_ascii_digit() {
        Some(String::from_utf8_lossy(version).into_owned())
    } else {
        None
    }
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    pdf_version(data).is_some()
}
