//! Document assembler: the HTML to PDF pipeline.
//!
//! A [`Converter`] wires a [`ContentExtractor`] to the block renderer,
//! the fallback text extractor, the paginator and the PDF writer.
//!
//! # Example
//!
//! ```no_run
//! use htmlpdf::convert::Converter;
//! use htmlpdf::render::RenderOptions;
//!
//! let converter = Converter::new(RenderOptions::default());
//! if let Some(bytes) = converter.convert("<h1>Report</h1><p>Body</p>", Some("Report")) {
//!     std::fs::write("report.pdf", bytes).unwrap();
//! }
//! ```

mod assembler;

pub use assembler::{assemble_story, Assembly};

use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::RenderedDocument;
use crate::parser::{ContentExtractor, StructuralExtractor};
use crate::render::{layout, PageLayout, RenderOptions};

/// Title used when none is supplied.
pub const DEFAULT_TITLE: &str = "Document";

/// Whether this build can produce PDFs.
pub fn backend_available() -> bool {
    cfg!(feature = "pdf")
}

/// Resolve an optional title; absent or blank titles become [`DEFAULT_TITLE`].
pub fn resolve_title(title: Option<&str>) -> String {
    match title {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => DEFAULT_TITLE.to_string(),
    }
}

/// One document in a batch conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// Source HTML
    pub html: String,
    /// Optional document title
    pub title: Option<String>,
}

impl ConversionJob {
    /// Create a job.
    pub fn new(html: impl Into<String>, title: Option<String>) -> Self {
        Self {
            html: html.into(),
            title,
        }
    }
}

/// Converts HTML documents into PDF bytes.
pub struct Converter {
    extractor: Box<dyn ContentExtractor>,
    options: RenderOptions,
    backend_available: bool,
}

impl Converter {
    /// Create a converter with the structural extractor.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            extractor: Box::new(StructuralExtractor::new()),
            options,
            backend_available: backend_available(),
        }
    }

    /// Replace the content extractor.
    pub fn with_extractor(mut self, extractor: Box<dyn ContentExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Override the capability flag.
    pub fn with_backend_available(mut self, available: bool) -> Self {
        self.backend_available = available;
        self
    }

    /// Get the render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Whether this converter will attempt conversions.
    pub fn is_available(&self) -> bool {
        self.backend_available
    }

    /// Run the full pipeline, keeping error detail.
    pub fn try_convert(&self, html: &str, title: Option<&str>) -> Result<RenderedDocument> {
        if !self.backend_available {
            return Err(Error::BackendUnavailable);
        }

        let title = resolve_title(title);
        let blocks = self.extractor.extract(html);
        log::debug!("Extracted {} block(s) from {} bytes", blocks.len(), html.len());

        let Assembly { story, mut stats } = assemble_story(&title, html, &blocks, &self.options);
        let pages = layout(&story, &self.options)?;
        let bytes = self.write(&pages, &title)?;

        stats.page_count = pages.len() as u32;
        Ok(RenderedDocument {
            title,
            bytes,
            page_count: stats.page_count,
            stats,
        })
    }

    #[cfg(feature = "pdf")]
    fn write(&self, pages: &[PageLayout], title: &str) -> Result<Vec<u8>> {
        crate::render::write_pdf(pages, title, &self.options)
    }

    #[cfg(not(feature = "pdf"))]
    fn write(&self, _pages: &[PageLayout], _title: &str) -> Result<Vec<u8>> {
        Err(Error::BackendUnavailable)
    }

    /// Convert HTML to PDF bytes.
    ///
    /// Returns `None` when the backend is unavailable (without looking at
    /// the input) or when any stage fails. Failures are logged, never raised.
    pub fn convert(&self, html: &str, title: Option<&str>) -> Option<Vec<u8>> {
        if !self.backend_available {
            log::debug!("PDF backend unavailable; skipping conversion");
            return None;
        }

        match panic::catch_unwind(AssertUnwindSafe(|| self.try_convert(html, title))) {
            Ok(Ok(document)) => Some(document.into_bytes()),
            Ok(Err(e)) => {
                log::error!("PDF conversion failed: {}", e);
                None
            }
            Err(_) => {
                log::error!("PDF conversion panicked");
                None
            }
        }
    }

    /// Convert many documents; results keep the input order.
    pub fn convert_batch(&self, jobs: &[ConversionJob]) -> Vec<Option<Vec<u8>>> {
        let run = |job: &ConversionJob| self.convert(&job.html, job.title.as_deref());
        if self.options.parallel {
            jobs.par_iter().map(run).collect()
        } else {
            jobs.iter().map(run).collect()
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// Convert on tokio's blocking pool.
#[cfg(feature = "async")]
pub async fn convert_async(html: String, title: Option<String>) -> Option<Vec<u8>> {
    let handle = tokio::task::spawn_blocking(move || {
        Converter::default().convert(&html, title.as_deref())
    });
    match handle.await {
        Ok(result) => result,
        Err(e) => {
            log::error!("PDF conversion task failed: {}", e);
            None
        }
    }
}
