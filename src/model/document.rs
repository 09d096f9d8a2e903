//! Document-level types.

use serde::{Deserialize, Serialize};

use super::ContentBlock;

/// A serialized PDF produced by one conversion.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Document title as rendered in the title block
    pub title: String,

    /// Serialized PDF bytes
    pub bytes: Vec<u8>,

    /// Number of pages in the document
    pub page_count: u32,

    /// What went into the document
    pub stats: ConversionStats,
}

impl RenderedDocument {
    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Take ownership of the PDF bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Suggested download file name. See [`pdf_filename`].
    pub fn suggested_filename(&self) -> String {
        pdf_filename(&self.title)
    }
}

/// File name for a document title: spaces and path separators become `_`.
pub fn pdf_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("{}.pdf", stem)
}

/// Statistics collected during one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of heading blocks extracted
    pub heading_count: u32,

    /// Number of paragraph blocks extracted
    pub paragraph_count: u32,

    /// Number of list blocks extracted
    pub list_count: u32,

    /// Number of list items across all lists
    pub list_item_count: u32,

    /// Number of table blocks extracted
    pub table_count: u32,

    /// Number of table rows across all tables
    pub table_row_count: u32,

    /// Paragraphs contributed by the fallback text extractor
    pub fallback_paragraph_count: u32,

    /// Whether the fallback text extractor ran
    pub fallback_used: bool,

    /// Number of pages produced
    pub page_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a sequence of extracted blocks.
    pub fn from_blocks(blocks: &[ContentBlock]) -> Self {
        let mut stats = Self::new();
        for block in blocks {
            stats.add_block(block);
        }
        stats
    }

    /// Tally one extracted block.
    pub fn add_block(&mut self, block: &ContentBlock) {
        match block {
            ContentBlock::Header { .. } => self.heading_count += 1,
            ContentBlock::Paragraph { .. } => self.paragraph_count += 1,
            ContentBlock::List { items } => {
                self.list_count += 1;
                self.list_item_count += items.len() as u32;
            }
            ContentBlock::Table { rows } => {
                self.table_count += 1;
                self.table_row_count += rows.len() as u32;
            }
        }
    }

    /// Total number of structural blocks.
    pub fn block_count(&self) -> u32 {
        self.heading_count + self.paragraph_count + self.list_count + self.table_count
    }
}
