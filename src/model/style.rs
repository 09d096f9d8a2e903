//! Style sheet types for the rendered document.

/// An RGB color with components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

impl Color {
    /// Pure white.
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Pure black.
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    /// Create a color from float components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value.
    pub fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as f32 / 255.0,
            g: ((value >> 8) & 0xFF) as f32 / 255.0,
            b: (value & 0xFF) as f32 / 255.0,
        }
    }

    /// Parse a `#RRGGBB` or `RRGGBB` string.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('#');
        if s.len() != 6 {
            return None;
        }
        u32::from_str_radix(s, 16).ok().map(Self::hex)
    }
}

/// Standard PDF font used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Helvetica
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
}

impl Font {
    /// PostScript base font name.
    pub fn base_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    /// All fonts registered in every document.
    pub fn all() -> [Font; 2] {
        [Font::Helvetica, Font::HelveticaBold]
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

/// Paragraph styling properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    /// Style name, for diagnostics
    pub name: &'static str,

    /// Font face
    pub font: Font,

    /// Font size in points
    pub font_size: f32,

    /// Baseline-to-baseline distance in points
    pub leading: f32,

    /// Text color
    pub color: Color,

    /// Text alignment
    pub alignment: Alignment,

    /// Left indent in points
    pub left_indent: f32,

    /// Space before paragraph in points
    pub space_before: f32,

    /// Space after paragraph in points
    pub space_after: f32,
}

impl ParagraphStyle {
    fn heading(name: &'static str, font_size: f32) -> Self {
        Self {
            name,
            font: Font::HelveticaBold,
            font_size,
            leading: font_size * 1.2,
            color: Color::hex(0x34495e),
            alignment: Alignment::Left,
            left_indent: 0.0,
            space_before: font_size * 0.5,
            space_after: font_size,
        }
    }
}

/// Styling for table primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    /// Header row font
    pub header_font: Font,
    /// Header row font size
    pub header_font_size: f32,
    /// Header row background
    pub header_background: Color,
    /// Body row font
    pub body_font: Font,
    /// Body row font size
    pub body_font_size: f32,
    /// Body row background
    pub body_background: Color,
    /// Text color for all cells
    pub text_color: Color,
    /// Grid line color
    pub grid_color: Color,
    /// Grid line width in points
    pub grid_width: f32,
    /// Horizontal cell padding
    pub padding_x: f32,
    /// Top cell padding
    pub padding_top: f32,
    /// Bottom padding for body rows
    pub padding_bottom: f32,
    /// Bottom padding for the header row
    pub header_padding_bottom: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header_font: Font::HelveticaBold,
            header_font_size: 10.0,
            header_background: Color::hex(0xf8f9fa),
            body_font: Font::Helvetica,
            body_font_size: 9.0,
            body_background: Color::WHITE,
            text_color: Color::hex(0x2c3e50),
            grid_color: Color::hex(0xdee2e6),
            grid_width: 1.0,
            padding_x: 6.0,
            padding_top: 3.0,
            padding_bottom: 3.0,
            header_padding_bottom: 12.0,
        }
    }
}

/// Fixed style sheet used by the block renderer.
///
/// Heading styles are an immutable table indexed by level.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    /// Document title style
    pub title: ParagraphStyle,

    /// Heading styles for levels 1 through 6
    pub headings: [ParagraphStyle; 6],

    /// Body paragraph style
    pub body: ParagraphStyle,

    /// List item style
    pub list_item: ParagraphStyle,

    /// Table style
    pub table: TableStyle,

    /// Glyph prefixed to list items
    pub bullet: char,

    /// Spacer after the title
    pub title_spacer: f32,

    /// Spacer after each list
    pub list_spacer: f32,

    /// Spacer after each table
    pub table_spacer: f32,

    /// Spacer after each fallback paragraph
    pub fallback_spacer: f32,
}

impl StyleSheet {
    /// Get the heading style for a level; out-of-range levels are clamped.
    pub fn heading(&self, level: u8) -> &ParagraphStyle {
        let index = level.clamp(1, 6) as usize - 1;
        &self.headings[index]
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        let text = Color::hex(0x2c3e50);
        Self {
            title: ParagraphStyle {
                name: "title",
                font: Font::HelveticaBold,
                font_size: 24.0,
                leading: 28.8,
                color: text,
                alignment: Alignment::Center,
                left_indent: 0.0,
                space_before: 0.0,
                space_after: 30.0,
            },
            headings: [
                ParagraphStyle::heading("h1", 20.0),
                ParagraphStyle::heading("h2", 18.0),
                ParagraphStyle::heading("h3", 16.0),
                ParagraphStyle::heading("h4", 14.0),
                ParagraphStyle::heading("h5", 12.0),
                ParagraphStyle::heading("h6", 11.0),
            ],
            body: ParagraphStyle {
                name: "body",
                font: Font::Helvetica,
                font_size: 11.0,
                leading: 14.0,
                color: text,
                alignment: Alignment::Justify,
                left_indent: 0.0,
                space_before: 0.0,
                space_after: 12.0,
            },
            list_item: ParagraphStyle {
                name: "list_item",
                font: Font::Helvetica,
                font_size: 11.0,
                leading: 14.0,
                color: text,
                alignment: Alignment::Left,
                left_indent: 20.0,
                space_before: 0.0,
                space_after: 6.0,
            },
            table: TableStyle::default(),
            bullet: '\u{2022}',
            title_spacer: 20.0,
            list_spacer: 10.0,
            table_spacer: 15.0,
            fallback_spacer: 12.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_sizes_decrease() {
        let sheet = StyleSheet::default();
        let sizes: Vec<f32> = (1..=6).map(|l| sheet.heading(l).font_size).collect();
        assert_eq!(sizes, vec![20.0, 18.0, 16.0, 14.0, 12.0, 11.0]);
        assert!(sizes.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_heading_lookup_clamps() {
        let sheet = StyleSheet::default();
        assert_eq!(sheet.heading(0).name, "h1");
        assert_eq!(sheet.heading(42).name, "h6");
    }

    #[test]
    fn test_color_parse() {
        let c = Color::parse("#2c3e50").unwrap();
        assert_eq!(c, Color::hex(0x2c3e50));
        assert!(Color::parse("#fff").is_none());
        assert!(Color::parse("zzzzzz").is_none());
    }
}
