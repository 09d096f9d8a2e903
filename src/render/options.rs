//! Rendering options and configuration.

use crate::model::StyleSheet;

/// Default character limit for the single fallback paragraph.
pub const DEFAULT_FALLBACK_MAX_CHARS: usize = 1000;

/// Options for rendering a document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page size
    pub page_size: PageSize,

    /// Page margins in points
    pub margins: Margins,

    /// Style sheet for titles, headings, body text, lists and tables
    pub styles: StyleSheet,

    /// Flate-compress page content streams
    pub compress: bool,

    /// Character limit for the synthetic fallback paragraph
    pub fallback_max_chars: usize,

    /// Convert batches on the rayon thread pool
    pub parallel: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the style sheet.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the fallback paragraph character limit.
    pub fn with_fallback_max_chars(mut self, max_chars: usize) -> Self {
        self.fallback_max_chars = max_chars;
        self
    }

    /// Disable parallel batch conversion.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::Letter,
            margins: Margins::uniform(72.0),
            styles: StyleSheet::default(),
            compress: true,
            fallback_max_chars: DEFAULT_FALLBACK_MAX_CHARS,
            parallel: true,
        }
    }
}

/// Page size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    /// US Letter (8.5 x 11 inches)
    #[default]
    Letter,
    /// A4 (210 x 297 mm)
    A4,
    /// Custom size in points
    Custom {
        /// Width in points
        width: f32,
        /// Height in points
        height: f32,
    },
}

impl PageSize {
    /// Page dimensions as (width, height) in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }

    /// Parse a page size name ("letter", "a4").
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(PageSize::Letter),
            "a4" => Ok(PageSize::A4),
            other => Err(format!("Unknown page size: {}", other)),
        }
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Top margin
    pub top: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
    /// Right margin
    pub right: f32,
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(points: f32) -> Self {
        Self {
            top: points,
            bottom: points,
            left: points,
            right: points,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(72.0)
    }
}
