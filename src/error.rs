//! Error types for htmlpdf library.

use std::io;
use thiserror::Error;

/// Result type alias for htmlpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting HTML to PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The PDF backend is not compiled into this build.
    #[error("PDF backend is not available")]
    BackendUnavailable,

    /// Error raised by the PDF object writer.
    #[error("PDF writer error: {0}")]
    Pdf(String),

    /// Error while paginating the story.
    #[error("Layout error: {0}")]
    Layout(String),

    /// Error while building the story from content blocks.
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(feature = "pdf")]
impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}
