//! Story: the ordered sequence of layout primitives handed to pagination.

use super::{ParagraphStyle, StyleSheet, TableStyle};

/// A single layout primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    /// A styled block of text (title, heading, body text or list item)
    Paragraph {
        /// Text to lay out; `\n` forces a line break
        text: String,
        /// Resolved paragraph style
        style: ParagraphStyle,
    },

    /// Fixed vertical space
    Spacer {
        /// Height in points
        height: f32,
    },

    /// A gridded table; row 0 is styled as the header row
    Table {
        /// Rows of cell text
        rows: Vec<Vec<String>>,
        /// Table style
        style: TableStyle,
    },
}

impl Flowable {
    /// Create a paragraph primitive.
    pub fn paragraph(text: impl Into<String>, style: &ParagraphStyle) -> Self {
        Flowable::Paragraph {
            text: text.into(),
            style: style.clone(),
        }
    }

    /// Create a spacer primitive.
    pub fn spacer(height: f32) -> Self {
        Flowable::Spacer { height }
    }

    /// Check if this is a spacer.
    pub fn is_spacer(&self) -> bool {
        matches!(self, Flowable::Spacer { .. })
    }
}

/// The ordered list of primitives making up one document.
///
/// A story always starts with the title paragraph and its spacer.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    items: Vec<Flowable>,
    preamble_len: usize,
}

impl Story {
    /// Start a story with the document title block and its trailing spacer.
    pub fn with_title(title: &str, sheet: &StyleSheet) -> Self {
        let items = vec![
            Flowable::paragraph(title, &sheet.title),
            Flowable::spacer(sheet.title_spacer),
        ];
        let preamble_len = items.len();
        Self {
            items,
            preamble_len,
        }
    }

    /// Append a primitive.
    pub fn push(&mut self, item: Flowable) {
        self.items.push(item);
    }

    /// All primitives in order.
    pub fn items(&self) -> &[Flowable] {
        &self.items
    }

    /// Primitives after the title preamble.
    pub fn body(&self) -> &[Flowable] {
        &self.items[self.preamble_len..]
    }

    /// Check if anything beyond the title preamble was added.
    pub fn has_body(&self) -> bool {
        self.items.len() > self.preamble_len
    }

    /// Total number of primitives, including the preamble.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// A story is never empty: the title is always present.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of paragraph primitives in the body.
    pub fn paragraph_count(&self) -> usize {
        self.body()
            .iter()
            .filter(|f| matches!(f, Flowable::Paragraph { .. }))
            .count()
    }

    /// Number of table primitives in the body.
    pub fn table_count(&self) -> usize {
        self.body()
            .iter()
            .filter(|f| matches!(f, Flowable::Table { .. }))
            .count()
    }

    /// Consume the story into its primitives.
    pub fn into_items(self) -> Vec<Flowable> {
        self.items
    }
}
