//! Content blocks extracted from HTML.

use serde::{Deserialize, Serialize};

/// One typed unit of extracted structure.
///
/// Blocks are produced in source order by the structural extractor and
/// consumed by the block renderer. Text carried by a block is already
/// trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A heading (`h1`..`h6`)
    Header {
        /// Heading text
        text: String,
        /// Heading level (1-6)
        level: u8,
    },

    /// A paragraph of body text
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// A bulleted or numbered list
    List {
        /// List items in source order
        items: Vec<String>,
    },

    /// A table; rows may have different cell counts
    Table {
        /// Rows of cell text
        rows: Vec<Vec<String>>,
    },
}

impl ContentBlock {
    /// Create a heading block, clamping the level to 1-6.
    pub fn header(text: impl Into<String>, level: u8) -> Self {
        ContentBlock::Header {
            text: text.into(),
            level: level.clamp(1, 6),
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::Paragraph { text: text.into() }
    }

    /// Create a list block.
    pub fn list<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        ContentBlock::List {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a table block from rows of cell text.
    pub fn table<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContentBlock::Table {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Short name of the block kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Header { .. } => "header",
            ContentBlock::Paragraph { .. } => "paragraph",
            ContentBlock::List { .. } => "list",
            ContentBlock::Table { .. } => "table",
        }
    }

    /// Check if the block carries no renderable content.
    pub fn is_empty(&self) -> bool {
        match self {
            ContentBlock::Header { text, .. } | ContentBlock::Paragraph { text } => {
                text.trim().is_empty()
            }
            ContentBlock::List { items } => items.iter().all(|i| i.trim().is_empty()),
            ContentBlock::Table { rows } => rows.is_empty(),
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            ContentBlock::Header { text, .. } | ContentBlock::Paragraph { text } => text.clone(),
            ContentBlock::List { items } => items
                .iter()
                .map(|item| format!("- {}", item))
                .collect::<Vec<_>>()
                .join("\n"),
            ContentBlock::Table { rows } => rows
                .iter()
                .map(|row| row.join("\t"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
