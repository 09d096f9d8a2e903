//! HTML parsing: tokenizer, entity decoding and structural extraction.

mod entities;
mod extractor;
mod options;
mod tokenizer;

pub use entities::{decode_basic_entities, decode_entities};
pub use extractor::{ContentExtractor, StructuralExtractor};
pub use options::{ExtractOptions, LooseText};
pub use tokenizer::{Token, Tokenizer};
