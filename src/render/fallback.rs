//! Fallback text extractor.
//!
//! Used when structural extraction yields nothing renderable: strips all
//! tags, collapses whitespace and recovers paragraphs from what is left.

use regex::Regex;

use crate::parser::decode_entities;

/// Marker appended to a truncated fallback paragraph.
pub const TRUNCATION_MARKER: &str = "...";

/// Recovers plain-text paragraphs from arbitrary markup.
pub struct FallbackExtractor {
    tag_pattern: Regex,
    whitespace_pattern: Regex,
    max_chars: usize,
}

impl FallbackExtractor {
    /// Create an extractor truncating single-run text at `max_chars`.
    pub fn new(max_chars: usize) -> Self {
        Self {
            tag_pattern: Regex::new(r"<[^>]+>").unwrap(),
            whitespace_pattern: Regex::new(r"\s+").unwrap(),
            max_chars,
        }
    }

    /// Strip tags and collapse whitespace into a single trimmed line.
    pub fn plain_text(&self, html: &str) -> String {
        let stripped = self.tag_pattern.replace_all(html, " ");
        let decoded = decode_entities(&stripped);
        self.whitespace_pattern
            .replace_all(&decoded, " ")
            .trim()
            .to_string()
    }

    /// Recover paragraphs from the text content of `html`.
    ///
    /// Whitespace collapsing removes every newline before paragraphs could
    /// be split, so the text always forms a single paragraph, truncated to
    /// `max_chars` characters plus `...` when longer. Empty text yields no
    /// paragraphs.
    pub fn paragraphs(&self, html: &str) -> Vec<String> {
        let text = self.plain_text(html);
        if text.is_empty() {
            return Vec::new();
        }
        vec![self.truncate(&text)]
    }

    fn truncate(&self, text: &str) -> String {
        match text.char_indices().nth(self.max_chars) {
            Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
            None => text.to_string(),
        }
    }
}

/// Recover fallback paragraphs from `html`.
pub fn fallback_paragraphs(html: &str, max_chars: usize) -> Vec<String> {
    FallbackExtractor::new(max_chars).paragraphs(html)
}
