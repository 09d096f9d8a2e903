//! JSON rendering of extracted content blocks.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{ContentBlock, ConversionStats};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct BlockDump<'a> {
    title: &'a str,
    stats: ConversionStats,
    blocks: &'a [ContentBlock],
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert extracted blocks to a JSON array.
pub fn to_json(blocks: &[ContentBlock], format: JsonFormat) -> Result<String> {
    serialize(&blocks, format)
}

/// Convert extracted blocks to a JSON object with the title and block statistics.
pub fn to_json_document(title: &str, blocks: &[ContentBlock], format: JsonFormat) -> Result<String> {
    let dump = BlockDump {
        title,
        stats: ConversionStats::from_blocks(blocks),
        blocks,
    };
    serialize(&dump, format)
}
