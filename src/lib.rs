//! # htmlpdf
//!
//! Convert HTML fragments into paginated, styled PDF documents.
//!
//! The pipeline recognises headings, paragraphs, lists and tables,
//! renders them with a fixed style sheet after a centered title, and falls
//! back to plain text recovery when the markup has no recognisable
//! structure.
//!
//! ## Quick Start
//!
//! ```no_run
//! let html = "<h1>Summary</h1><p>Revenue grew.</p><ul><li>North</li><li>South</li></ul>";
//!
//! if let Some(pdf) = htmlpdf::convert(html, Some("Quarterly Report")) {
//!     std::fs::write("report.pdf", pdf).unwrap();
//! }
//! ```
//!
//! ## Features
//!
//! - **Structural extraction**: headings, paragraphs, lists and tables in document order
//! - **Fallback text**: tag-stripped text when no structure is found
//! - **Pagination**: word wrap, justification, tables that never split rows
//! - **Deterministic output**: identical input gives byte-identical PDFs
//! - **Parallel batches**: uses Rayon for many documents at once

pub mod convert;
pub mod detect;
pub mod error;
pub mod html;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{backend_available, ConversionJob, Converter, DEFAULT_TITLE};
pub use detect::{detect_markup, is_pdf_bytes, MarkupKind};
pub use error::{Error, Result};
pub use html::{clean_for_download, prettify};
pub use model::{
    pdf_filename, Alignment, Color, ContentBlock, ConversionStats, Flowable, Font, ParagraphStyle,
    RenderedDocument, Story, StyleSheet, TableStyle,
};
pub use parser::{ContentExtractor, ExtractOptions, LooseText, StructuralExtractor};
pub use render::{JsonFormat, Margins, PageSize, RenderOptions};

#[cfg(feature = "async")]
pub use convert::convert_async;

/// Convert HTML to PDF bytes.
///
/// A missing or empty title becomes "Document". Returns `None` when the
/// PDF backend is unavailable or the conversion fails; failures are logged.
///
/// # Example
///
/// ```no_run
/// let pdf = htmlpdf::convert("<p>Hello</p>", None).unwrap();
/// assert!(pdf.starts_with(b"%PDF-"));
/// ```
pub fn convert(html: &str, title: Option<&str>) -> Option<Vec<u8>> {
    Converter::default().convert(html, title)
}

/// Convert HTML to PDF, keeping error detail and conversion statistics.
///
/// # Example
///
/// ```no_run
/// let doc = htmlpdf::try_convert("<table><tr><td>1</td></tr></table>", Some("T"))?;
/// println!("{} page(s), {} table(s)", doc.page_count, doc.stats.table_count);
/// # Ok::<(), htmlpdf::Error>(())
/// ```
pub fn try_convert(html: &str, title: Option<&str>) -> Result<RenderedDocument> {
    Converter::default().try_convert(html, title)
}

/// Extract content blocks from HTML with default options.
///
/// # Example
///
/// ```
/// use htmlpdf::{extract_blocks, ContentBlock};
///
/// let blocks = extract_blocks("<h2>Intro</h2><p>Body</p>");
/// assert_eq!(blocks[0], ContentBlock::header("Intro", 2));
/// assert_eq!(blocks[1], ContentBlock::paragraph("Body"));
/// ```
pub fn extract_blocks(html: &str) -> Vec<ContentBlock> {
    StructuralExtractor::new().extract(html)
}

/// Extract content blocks from HTML with custom options.
pub fn extract_blocks_with_options(html: &str, options: ExtractOptions) -> Vec<ContentBlock> {
    StructuralExtractor::with_options(options).extract(html)
}

/// Builder for converting HTML documents.
///
/// # Example
///
/// ```no_run
/// use htmlpdf::{HtmlPdf, PageSize};
///
/// let pdf = HtmlPdf::new()
///     .with_title("Inventory")
///     .with_page_size(PageSize::A4)
///     .loose_text_as_paragraphs()
///     .convert("<p>Widgets</p>")?;
/// # Ok::<(), htmlpdf::Error>(())
/// ```
pub struct HtmlPdf {
    title: Option<String>,
    extract_options: ExtractOptions,
    render_options: RenderOptions,
}

impl HtmlPdf {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            title: None,
            extract_options: ExtractOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.render_options = self.render_options.with_page_size(size);
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.render_options = self.render_options.with_margins(margins);
        self
    }

    /// Set the style sheet.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.render_options = self.render_options.with_styles(styles);
        self
    }

    /// Emit text outside block elements as paragraphs.
    pub fn loose_text_as_paragraphs(mut self) -> Self {
        self.extract_options = self.extract_options.loose_text_as_paragraphs();
        self
    }

    /// Write uncompressed content streams.
    pub fn uncompressed(mut self) -> Self {
        self.render_options = self.render_options.with_compression(false);
        self
    }

    /// Set the fallback paragraph character limit.
    pub fn with_fallback_max_chars(mut self, max_chars: usize) -> Self {
        self.render_options = self.render_options.with_fallback_max_chars(max_chars);
        self
    }

    /// Build the converter this builder describes.
    pub fn converter(self) -> Converter {
        Converter::new(self.render_options)
            .with_extractor(Box::new(StructuralExtractor::with_options(self.extract_options)))
    }

    /// Convert HTML, returning the rendered document.
    pub fn render(self, html: &str) -> Result<RenderedDocument> {
        let title = self.title.clone();
        self.converter().try_convert(html, title.as_deref())
    }

    /// Convert HTML, returning the PDF bytes.
    pub fn convert(self, html: &str) -> Result<Vec<u8>> {
        self.render(html).map(RenderedDocument::into_bytes)
    }
}

impl Default for HtmlPdf {
    fn default() -> Self {
        Self::new()
    }
}
