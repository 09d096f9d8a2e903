//! Rendering: block renderer, fallback extraction, pagination and PDF output.

mod blocks;
mod fallback;
pub mod fonts;
mod json;
mod layout;
mod options;
#[cfg(feature = "pdf")]
mod pdf;

pub use blocks::{build_story, BlockRenderer};
pub use fallback::{fallback_paragraphs, FallbackExtractor, TRUNCATION_MARKER};
pub use fonts::{decode_win_ansi, encode_win_ansi, text_width, EncodedText};
pub use json::{to_json, to_json_document, JsonFormat};
pub use layout::{layout, DrawOp, PageLayout};
pub use options::{Margins, PageSize, RenderOptions, DEFAULT_FALLBACK_MAX_CHARS};
#[cfg(feature = "pdf")]
pub use pdf::{write_pdf, PRODUCER};
