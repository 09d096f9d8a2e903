//! Pagination: turns a story into positioned drawing operations per page.
//!
//! Coordinates are PDF user space (origin bottom-left, points).

use unicode_normalization::UnicodeNormalization;

use super::fonts::{char_width, text_width};
use super::options::RenderOptions;
use crate::error::{Error, Result};
use crate::model::{Alignment, Color, Flowable, Font, ParagraphStyle, Story, TableStyle};

/// Minimum width for a table column, in points.
const MIN_COLUMN_WIDTH: f32 = 24.0;

/// Line height multiple used for table cell text.
const CELL_LEADING_FACTOR: f32 = 1.2;

/// A positioned drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// One line of text with its baseline origin at (x, y)
    Text {
        /// Baseline start x
        x: f32,
        /// Baseline y
        y: f32,
        /// Font face
        font: Font,
        /// Font size in points
        size: f32,
        /// Fill color
        color: Color,
        /// Extra space added to each ASCII space (justification)
        word_spacing: f32,
        /// Normalized text of the line
        text: String,
    },

    /// Filled rectangle
    FillRect {
        /// Lower-left x
        x: f32,
        /// Lower-left y
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
        /// Fill color
        color: Color,
    },

    /// Stroked rectangle outline
    StrokeRect {
        /// Lower-left x
        x: f32,
        /// Lower-left y
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
        /// Line width
        line_width: f32,
        /// Stroke color
        color: Color,
    },
}

/// A laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Drawing operations in paint order
    pub ops: Vec<DrawOp>,
}

impl PageLayout {
    fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Iterate over the text lines drawn on this page.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// One wrapped line.
#[derive(Debug, Clone, PartialEq)]
struct Line {
    words: Vec<String>,
    width: f32,
    /// Last line of a paragraph or before a forced break
    ends_run: bool,
}

impl Line {
    fn text(&self) -> String {
        self.words.join(" ")
    }
}

fn is_break_space(ch: char) -> bool {
    ch.is_whitespace() && ch != '\u{a0}'
}

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// `\n` forces a break; words wider than the line are split by character.
fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<Line> {
    let space = char_width(font, ' ') as f32 * size / 1000.0;
    let mut lines = Vec::new();

    for run in text.split('\n') {
        let mut current = Line {
            words: Vec::new(),
            width: 0.0,
            ends_run: false,
        };

        for word in run.split(is_break_space).filter(|w| !w.is_empty()) {
            let word_width = text_width(font, size, word);

            if word_width > max_width {
                if !current.words.is_empty() {
                    lines.push(std::mem::replace(
                        &mut current,
                        Line {
                            words: Vec::new(),
                            width: 0.0,
                            ends_run: false,
                        },
                    ));
                }
                let mut pieces = split_word(word, font, size, max_width);
                if let Some(last) = pieces.pop() {
                    for piece in pieces {
                        let width = text_width(font, size, &piece);
                        lines.push(Line {
                            words: vec![piece],
                            width,
                            ends_run: false,
                        });
                    }
                    current.width = text_width(font, size, &last);
                    current.words.push(last);
                }
                continue;
            }

            if current.words.is_empty() {
                current.words.push(word.to_string());
                current.width = word_width;
            } else if current.width + space + word_width <= max_width {
                current.words.push(word.to_string());
                current.width += space + word_width;
            } else {
                let full = std::mem::replace(
                    &mut current,
                    Line {
                        words: vec![word.to_string()],
                        width: word_width,
                        ends_run: false,
                    },
                );
                lines.push(full);
            }
        }

        current.ends_run = true;
        lines.push(current);
    }

    lines
}

/// Split a single over-long word into pieces that each fit `max_width`.
fn split_word(word: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;

    for ch in word.chars() {
        let w = char_width(font, ch) as f32 * size / 1000.0;
        if !piece.is_empty() && width + w > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(ch);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Lays out story items into pages.
struct Paginator<'a> {
    options: &'a RenderOptions,
    page_width: f32,
    page_height: f32,
    frame_left: f32,
    frame_width: f32,
    frame_top: f32,
    frame_bottom: f32,
    pages: Vec<PageLayout>,
    current: PageLayout,
    cursor: f32,
    page_has_content: bool,
}

impl<'a> Paginator<'a> {
    fn new(options: &'a RenderOptions) -> Result<Self> {
        let (page_width, page_height) = options.page_size.dimensions();
        let margins = options.margins;
        let frame_width = page_width - margins.left - margins.right;
        let frame_top = page_height - margins.top;
        let frame_bottom = margins.bottom;

        if frame_width <= 0.0 || frame_top <= frame_bottom {
            return Err(Error::Layout(format!(
                "margins leave no room on a {}x{} page",
                page_width, page_height
            )));
        }

        Ok(Self {
            options,
            page_width,
            page_height,
            frame_left: margins.left,
            frame_width,
            frame_top,
            frame_bottom,
            pages: Vec::new(),
            current: PageLayout::new(1, page_width, page_height),
            cursor: frame_top,
            page_has_content: false,
        })
    }

    fn frame_height(&self) -> f32 {
        self.frame_top - self.frame_bottom
    }

    fn new_page(&mut self) {
        let number = self.current.number + 1;
        let finished = std::mem::replace(
            &mut self.current,
            PageLayout::new(number, self.page_width, self.page_height),
        );
        self.pages.push(finished);
        self.cursor = self.frame_top;
        self.page_has_content = false;
    }

    /// Vertical space; discarded at the top of a page.
    fn add_space(&mut self, height: f32) {
        if !self.page_has_content || height <= 0.0 {
            return;
        }
        if self.cursor - height < self.frame_bottom {
            self.new_page();
        } else {
            self.cursor -= height;
        }
    }

    fn place(&mut self, item: &Flowable) {
        match item {
            Flowable::Paragraph { text, style } => self.place_paragraph(text, style),
            Flowable::Spacer { height } => self.add_space(*height),
            Flowable::Table { rows, style } => self.place_table(rows, style),
        }
    }

    fn place_paragraph(&mut self, text: &str, style: &ParagraphStyle) {
        let text: String = text.nfc().collect();
        let avail = (self.frame_width - style.left_indent).max(1.0);
        let lines = wrap_text(&text, style.font, style.font_size, avail);

        self.add_space(style.space_before);

        for line in lines {
            if self.cursor - style.leading < self.frame_bottom && self.page_has_content {
                self.new_page();
            }
            let baseline = self.cursor - style.font_size;
            self.cursor -= style.leading;
            self.page_has_content = true;

            if line.words.is_empty() {
                continue;
            }

            let left = self.frame_left + style.left_indent;
            let slack = (avail - line.width).max(0.0);
            let (x, word_spacing) = match style.alignment {
                Alignment::Left => (left, 0.0),
                Alignment::Center => (left + slack / 2.0, 0.0),
                Alignment::Right => (left + slack, 0.0),
                Alignment::Justify => {
                    let gaps = line.text().matches(' ').count();
                    if line.ends_run || gaps == 0 {
                        (left, 0.0)
                    } else {
                        (left, slack / gaps as f32)
                    }
                }
            };

            self.current.ops.push(DrawOp::Text {
                x,
                y: baseline,
                font: style.font,
                size: style.font_size,
                color: style.color,
                word_spacing,
                text: line.text(),
            });
        }

        self.add_space(style.space_after);
    }

    fn column_widths(&self, rows: &[Vec<String>], style: &TableStyle, columns: usize) -> Vec<f32> {
        let mut widths = vec![MIN_COLUMN_WIDTH; columns];
        for (index, row) in rows.iter().enumerate() {
            let (font, size) = row_font(style, index);
            for (col, cell) in row.iter().enumerate() {
                let text: String = cell.nfc().collect();
                let natural = text
                    .split('\n')
                    .map(|l| text_width(font, size, l))
                    .fold(0.0, f32::max)
                    + 2.0 * style.padding_x;
                widths[col] = widths[col].max(natural);
            }
        }

        let total: f32 = widths.iter().sum();
        if total > self.frame_width {
            let scale = self.frame_width / total;
            for w in &mut widths {
                *w *= scale;
            }
        }
        widths
    }

    fn place_table(&mut self, rows: &[Vec<String>], style: &TableStyle) {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return;
        }
        let widths = self.column_widths(rows, style, columns);

        for (index, row) in rows.iter().enumerate() {
            let (font, size) = row_font(style, index);
            let leading = size * CELL_LEADING_FACTOR;
            let padding_bottom = if index == 0 {
                style.header_padding_bottom
            } else {
                style.padding_bottom
            };
            let background = if index == 0 {
                style.header_background
            } else {
                style.body_background
            };

            let max_lines = (((self.frame_height() - style.padding_top - padding_bottom)
                / leading)
                .floor() as usize)
                .max(1);

            let mut cells: Vec<Vec<Line>> = (0..columns)
                .map(|col| {
                    let text: String = row
                        .get(col)
                        .map(|c| c.nfc().collect())
                        .unwrap_or_default();
                    let inner = (widths[col] - 2.0 * style.padding_x).max(1.0);
                    if text.is_empty() {
                        Vec::new()
                    } else {
                        wrap_text(&text, font, size, inner)
                    }
                })
                .collect();

            for lines in &mut cells {
                if lines.len() > max_lines {
                    log::warn!(
                        "Table cell with {} lines truncated to {} to fit one page",
                        lines.len(),
                        max_lines
                    );
                    lines.truncate(max_lines);
                }
            }

            let line_count = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
            let row_height = style.padding_top + line_count as f32 * leading + padding_bottom;

            if self.cursor - row_height < self.frame_bottom && self.page_has_content {
                self.new_page();
            }

            let top = self.cursor;
            let bottom = top - row_height;
            let mut x = self.frame_left;

            for (col, lines) in cells.iter().enumerate() {
                let width = widths[col];
                self.current.ops.push(DrawOp::FillRect {
                    x,
                    y: bottom,
                    width,
                    height: row_height,
                    color: background,
                });

                let mut baseline = top - style.padding_top - size;
                for line in lines {
                    if !line.words.is_empty() {
                        self.current.ops.push(DrawOp::Text {
                            x: x + style.padding_x,
                            y: baseline,
                            font,
                            size,
                            color: style.text_color,
                            word_spacing: 0.0,
                            text: line.text(),
                        });
                    }
                    baseline -= leading;
                }

                self.current.ops.push(DrawOp::StrokeRect {
                    x,
                    y: bottom,
                    width,
                    height: row_height,
                    line_width: style.grid_width,
                    color: style.grid_color,
                });
                x += width;
            }

            self.cursor = bottom;
            self.page_has_content = true;
        }
    }

    fn finish(mut self) -> Vec<PageLayout> {
        self.pages.push(self.current);
        log::debug!(
            "Laid out {} page(s) at {:?}",
            self.pages.len(),
            self.options.page_size
        );
        self.pages
    }
}

fn row_font(style: &TableStyle, index: usize) -> (Font, f32) {
    if index == 0 {
        (style.header_font, style.header_font_size)
    } else {
        (style.body_font, style.body_font_size)
    }
}

/// Lay out a story into pages. Always yields at least one page.
pub fn layout(story: &Story, options: &RenderOptions) -> Result<Vec<PageLayout>> {
    let mut paginator = Paginator::new(options)?;
    for item in story.items() {
        paginator.place(item);
    }
    Ok(paginator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentBlock, StyleSheet};
    use crate::render::build_story;

    fn lines_of(pages: &[PageLayout]) -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| p.text_lines().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(10);
        let lines = wrap_text(&text, Font::Helvetica, 11.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 200.0 + 0.01);
        }
        assert!(lines.last().unwrap().ends_run);
        assert!(!lines[0].ends_run);
    }

    #[test]
    fn test_wrap_forced_breaks() {
        let lines = wrap_text("one\ntwo\n\nthree", Font::Helvetica, 11.0, 400.0);
        let texts: Vec<String> = lines.iter().map(Line::text).collect();
        assert_eq!(texts, vec!["one", "two", "", "three"]);
    }

    #[test]
    fn test_wrap_splits_long_word() {
        let word = "W".repeat(80);
        let lines = wrap_text(&word, Font::Helvetica, 11.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.iter().map(Line::text).collect::<String>(), word);
    }

    #[test]
    fn test_nbsp_does_not_break() {
        let lines = wrap_text("B\u{a0}C", Font::Helvetica, 11.0, 400.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].words.len(), 1);
    }

    #[test]
    fn test_title_only_single_page() {
        let styles = StyleSheet::default();
        let story = build_story("Document", &[], &styles);
        let pages = layout(&story, &RenderOptions::default()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(lines_of(&pages), vec!["Document"]);
    }

    #[test]
    fn test_title_centered() {
        let styles = StyleSheet::default();
        let story = build_story("Hi", &[], &styles);
        let pages = layout(&story, &RenderOptions::default()).unwrap();
        match &pages[0].ops[0] {
            DrawOp::Text { x, y, .. } => {
                let width = text_width(Font::HelveticaBold, 24.0, "Hi");
                assert!((x - (72.0 + (468.0 - width) / 2.0)).abs() < 0.01);
                assert!((y - (720.0 - 24.0)).abs() < 0.01);
            }
            other => panic!("Expected text op, got {:?}", other),
        }
    }

    #[test]
    fn test_long_document_paginates() {
        let styles = StyleSheet::default();
        let blocks: Vec<ContentBlock> = (0..200)
            .map(|i| ContentBlock::paragraph(format!("Paragraph number {}", i)))
            .collect();
        let story = build_story("Long", &blocks, &styles);
        let pages = layout(&story, &RenderOptions::default()).unwrap();
        assert!(pages.len() > 1);
        assert_eq!(lines_of(&pages).len(), 201);
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.number, i as u32 + 1);
            for op in &page.ops {
                if let DrawOp::Text { y, .. } = op {
                    assert!(*y >= 72.0 - 11.0);
                }
            }
        }
    }

    #[test]
    fn test_justified_lines_get_word_spacing() {
        let styles = StyleSheet::default();
        let text = "lorem ipsum dolor sit amet ".repeat(20);
        let story = build_story("J", &[ContentBlock::paragraph(text)], &styles);
        let pages = layout(&story, &RenderOptions::default()).unwrap();
        let spacings: Vec<f32> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text {
                    word_spacing, size, ..
                } if *size == 11.0 => Some(*word_spacing),
                _ => None,
            })
            .collect();
        assert!(spacings.len() > 1);
        assert_eq!(*spacings.last().unwrap(), 0.0);
        assert!(spacings[..spacings.len() - 1].iter().all(|w| *w >= 0.0));
    }

    #[test]
    fn test_table_grid_covers_missing_cells() {
        let styles = StyleSheet::default();
        let table = ContentBlock::table([vec!["A", "B", "C"], vec!["1"]]);
        let story = build_story("T", &[table], &styles);
        let pages = layout(&story, &RenderOptions::default()).unwrap();

        let strokes = pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::StrokeRect { .. }))
            .count();
        assert_eq!(strokes, 6);
        assert_eq!(lines_of(&pages), vec!["T", "A", "B", "C", "1"]);
    }

    #[test]
    fn test_wide_table_scaled_to_frame() {
        let styles = StyleSheet::default();
        let wide = "word ".repeat(60);
        let table = ContentBlock::table([vec![wide.as_str(), wide.as_str()], vec!["x", "y"]]);
        let story = build_story("T", &[table], &styles);
        let pages = layout(&story, &RenderOptions::default()).unwrap();

        let right_edge = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokeRect { x, width, .. } => Some(x + width),
                _ => None,
            })
            .fold(0.0, f32::max);
        assert!(right_edge <= 540.0 + 0.01);
    }

    #[test]
    fn test_header_row_style() {
        let styles = StyleSheet::default();
        let table = ContentBlock::table([vec!["H"], vec!["b"]]);
        let story = build_story("T", &[table], &styles);
        let pages = layout(&story, &RenderOptions::default()).unwrap();
        let fonts: Vec<(Font, f32)> = pages[0]
            .ops
            .iter()
            .skip(1)
            .filter_map(|op| match op {
                DrawOp::Text { font, size, .. } => Some((*font, *size)),
                _ => None,
            })
            .collect();
        assert_eq!(
            fonts,
            vec![(Font::HelveticaBold, 10.0), (Font::Helvetica, 9.0)]
        );
    }

    #[test]
    fn test_margins_too_large() {
        let options = RenderOptions::default().with_margins(crate::render::Margins::uniform(400.0));
        let story = build_story("T", &[], &StyleSheet::default());
        assert!(matches!(layout(&story, &options), Err(Error::Layout(_))));
    }
}
