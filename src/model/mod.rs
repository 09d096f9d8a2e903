//! Document model types.
//!
//! This module defines the intermediate representation that bridges HTML
//! extraction and PDF rendering: typed content blocks on one side, styled
//! layout primitives on the other.

mod block;
mod document;
mod story;
mod style;

pub use block::ContentBlock;
pub use document::{pdf_filename, ConversionStats, RenderedDocument};
pub use story::{Flowable, Story};
pub use style::{Alignment, Color, Font, ParagraphStyle, StyleSheet, TableStyle};
