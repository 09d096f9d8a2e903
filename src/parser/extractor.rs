//! Structural extractor: HTML tokens to content blocks.
//!
//! Exactly one block collector is active at a time. Transitions between
//! collectors are resolved by fixed rules rather than by overwriting state:
//!
//! - opening a heading, paragraph, list or table while a heading or
//!   paragraph is open flushes the open block first;
//! - inside a list item or table cell, `p` and `h1`..`h6` are inline;
//! - a list nested in a list is flattened into the outer list;
//! - a table nested in a table cell contributes text to that cell;
//! - `li` outside a list, `tr`/`td`/`th` outside a table are ignored;
//! - `td`/`th` directly inside a table (no `tr`) opens a row implicitly;
//! - a heading, paragraph, list or table opened inside a list or table
//!   with no item or cell open flushes the list or table first;
//! - closing tags that do not match the open collector are ignored;
//! - self-closing `title`, `script` and `style` suppress nothing.
//!
//! Text outside any collector is loose text. It becomes paragraphs in
//! source order, but a fragment made only of loose text yields no blocks
//! under [`LooseText::Fallback`] so the fallback extractor can recover it.

use crate::model::ContentBlock;

use super::options::{ExtractOptions, LooseText};
use super::tokenizer::{Token, Tokenizer};

/// Something that turns an HTML fragment into content blocks.
pub trait ContentExtractor: Send + Sync {
    /// Extract blocks in source order. Never fails.
    fn extract(&self, html: &str) -> Vec<ContentBlock>;
}

/// The default tag-aware extractor.
#[derive(Debug, Clone, Default)]
pub struct StructuralExtractor {
    options: ExtractOptions,
}

impl StructuralExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Get the extraction options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }
}

impl ContentExtractor for StructuralExtractor {
    fn extract(&self, html: &str) -> Vec<ContentBlock> {
        let mut machine = BlockMachine::new(&self.options);
        for token in Tokenizer::new(html) {
            machine.feed(token);
        }
        let blocks = machine.finish();
        log::debug!("Extracted {} blocks from {} bytes", blocks.len(), html.len());
        blocks
    }
}

/// Text accumulator that collapses whitespace as it goes.
///
/// Source whitespace becomes single spaces; `<br>` becomes a hard `\n`.
#[derive(Debug, Default)]
struct TextBuffer(String);

impl TextBuffer {
    fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                if !self.0.ends_with(' ') {
                    self.0.push(' ');
                }
            } else {
                self.0.push(ch);
            }
        }
    }

    fn push_break(&mut self) {
        self.0.push('\n');
    }

    fn finish(self) -> String {
        self.0
            .split('\n')
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n")
            .trim_matches('\n')
            .to_string()
    }
}

#[derive(Debug, Default)]
struct ListBuilder {
    depth: u32,
    items: Vec<String>,
    current: Option<TextBuffer>,
}

impl ListBuilder {
    fn start_item(&mut self) {
        self.finish_item();
        self.current = Some(TextBuffer::default());
    }

    fn finish_item(&mut self) {
        if let Some(buf) = self.current.take() {
            let text = buf.finish();
            if !text.is_empty() {
                self.items.push(text);
            }
        }
    }

    fn finish(mut self) -> Option<ContentBlock> {
        self.finish_item();
        if self.items.is_empty() {
            None
        } else {
            Some(ContentBlock::List { items: self.items })
        }
    }
}

#[derive(Debug, Default)]
struct TableBuilder {
    depth: u32,
    rows: Vec<Vec<String>>,
    row: Option<Vec<String>>,
    cell: Option<TextBuffer>,
}

impl TableBuilder {
    fn start_row(&mut self) {
        self.finish_row();
        self.row = Some(Vec::new());
    }

    fn start_cell(&mut self) {
        self.finish_cell();
        if self.row.is_none() {
            self.row = Some(Vec::new());
        }
        self.cell = Some(TextBuffer::default());
    }

    fn finish_cell(&mut self) {
        if let Some(buf) = self.cell.take() {
            self.row.get_or_insert_with(Vec::new).push(buf.finish());
        }
    }

    fn finish_row(&mut self) {
        self.finish_cell();
        if let Some(cells) = self.row.take() {
            if cells.iter().any(|c| !c.is_empty()) {
                self.rows.push(cells);
            }
        }
    }

    fn finish(mut self) -> Option<ContentBlock> {
        self.finish_row();
        if self.rows.is_empty() {
            None
        } else {
            Some(ContentBlock::Table { rows: self.rows })
        }
    }
}

/// The currently open block kind.
#[derive(Debug, Default)]
enum Collector {
    #[default]
    Idle,
    Heading {
        level: u8,
        text: TextBuffer,
    },
    Paragraph {
        text: TextBuffer,
    },
    List(ListBuilder),
    Table(TableBuilder),
}

/// Per-call extraction state. Created fresh for every `extract` call.
struct BlockMachine<'o> {
    options: &'o ExtractOptions,
    blocks: Vec<ContentBlock>,
    collector: Collector,
    loose: TextBuffer,
    structural: usize,
    suppressed: u32,
}

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

impl<'o> BlockMachine<'o> {
    fn new(options: &'o ExtractOptions) -> Self {
        Self {
            options,
            blocks: Vec::new(),
            collector: Collector::Idle,
            loose: TextBuffer::default(),
            structural: 0,
            suppressed: 0,
        }
    }

    fn feed(&mut self, token: Token<'_>) {
        match token {
            Token::StartTag { name, self_closing } => self.open(&name, self_closing),
            Token::EndTag { name } => self.close(&name),
            Token::Text(text) => self.text(&text),
        }
    }

    fn open(&mut self, name: &str, self_closing: bool) {
        if let Some(level) = heading_level(name) {
            if self.begin_block() {
                self.collector = Collector::Heading {
                    level,
                    text: TextBuffer::default(),
                };
            }
            return;
        }

        match name {
            "br" => self.line_break(),
            "title" | "script" | "style" => {
                if !self_closing {
                    self.suppressed += 1;
                }
            }
            "p" => {
                if self.begin_block() {
                    self.collector = Collector::Paragraph {
                        text: TextBuffer::default(),
                    };
                }
            }
            "ul" | "ol" => {
                if let Collector::List(list) = &mut self.collector {
                    list.finish_item();
                    list.depth += 1;
                } else if self.begin_block() {
                    self.collector = Collector::List(ListBuilder::default());
                }
            }
            "li" => {
                if let Collector::List(list) = &mut self.collector {
                    list.start_item();
                }
            }
            "table" => {
                if let Collector::Table(table) = &mut self.collector {
                    table.depth += 1;
                } else if self.begin_block() {
                    self.collector = Collector::Table(TableBuilder::default());
                }
            }
            "tr" => {
                if let Collector::Table(table) = &mut self.collector {
                    if table.depth == 0 {
                        table.start_row();
                    }
                }
            }
            "td" | "th" => {
                if let Collector::Table(table) = &mut self.collector {
                    if table.depth == 0 {
                        table.start_cell();
                    }
                }
            }
            _ => {}
        }
    }

    /// Prepare to open a new top-level block.
    ///
    /// Returns false when the new block is inline content of an open list
    /// item or table cell and no collector change should happen.
    fn begin_block(&mut self) -> bool {
        match &self.collector {
            Collector::List(list) if list.current.is_some() => false,
            Collector::Table(table) if table.cell.is_some() => false,
            Collector::Idle => {
                self.flush_loose();
                true
            }
            _ => {
                self.flush_collector();
                self.flush_loose();
                true
            }
        }
    }

    fn close(&mut self, name: &str) {
        if heading_level(name).is_some() {
            if matches!(self.collector, Collector::Heading { .. }) {
                self.flush_collector();
            }
            return;
        }

        match name {
            "title" | "script" | "style" => {
                self.suppressed = self.suppressed.saturating_sub(1);
            }
            "p" => {
                if matches!(self.collector, Collector::Paragraph { .. }) {
                    self.flush_collector();
                }
            }
            "li" => {
                if let Collector::List(list) = &mut self.collector {
                    list.finish_item();
                }
            }
            "ul" | "ol" => {
                if let Collector::List(list) = &mut self.collector {
                    if list.depth > 0 {
                        list.finish_item();
                        list.depth -= 1;
                    } else {
                        self.flush_collector();
                    }
                }
            }
            "table" => {
                if let Collector::Table(table) = &mut self.collector {
                    if table.depth > 0 {
                        table.depth -= 1;
                    } else {
                        self.flush_collector();
                    }
                }
            }
            "tr" => {
                if let Collector::Table(table) = &mut self.collector {
                    if table.depth == 0 {
                        table.finish_row();
                    }
                }
            }
            "td" | "th" => {
                if let Collector::Table(table) = &mut self.collector {
                    if table.depth == 0 {
                        table.finish_cell();
                    }
                }
            }
            _ => {}
        }
    }

    /// Buffer receiving text right now. Text with no open heading,
    /// paragraph, list item or cell is loose.
    fn target(&mut self) -> &mut TextBuffer {
        match &mut self.collector {
            Collector::Heading { text, .. } | Collector::Paragraph { text } => text,
            Collector::List(ListBuilder {
                current: Some(text),
                ..
            }) => text,
            Collector::Table(TableBuilder {
                cell: Some(text), ..
            }) => text,
            _ => &mut self.loose,
        }
    }

    fn text(&mut self, text: &str) {
        if self.suppressed > 0 {
            return;
        }
        self.target().push_text(text);
    }

    fn line_break(&mut self) {
        self.target().push_break();
    }

    /// Close the active collector, emitting its block if it has content.
    fn flush_collector(&mut self) {
        let block = match std::mem::take(&mut self.collector) {
            Collector::Idle => None,
            Collector::Heading { level, text } => {
                let text = text.finish();
                (!text.is_empty()).then_some(ContentBlock::Header { text, level })
            }
            Collector::Paragraph { text } => {
                let text = text.finish();
                (!text.is_empty()).then_some(ContentBlock::Paragraph { text })
            }
            Collector::List(list) => list.finish(),
            Collector::Table(table) => table.finish(),
        };

        if let Some(block) = block {
            self.structural += 1;
            self.blocks.push(block);
        }
    }

    fn flush_loose(&mut self) {
        let text = std::mem::take(&mut self.loose).finish();
        if !text.is_empty() {
            self.blocks.push(ContentBlock::Paragraph { text });
        }
    }

    fn finish(mut self) -> Vec<ContentBlock> {
        // Unclosed headings are salvaged as plain paragraphs.
        self.collector = match std::mem::take(&mut self.collector) {
            Collector::Heading { text, .. } => Collector::Paragraph { text },
            other => other,
        };
        self.flush_collector();
        self.flush_loose();

        if self.structural == 0 && self.options.loose_text == LooseText::Fallback {
            if !self.blocks.is_empty() {
                log::debug!("Only loose text found; leaving it to the fallback extractor");
            }
            return Vec::new();
        }
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<ContentBlock> {
        StructuralExtractor::new().extract(html)
    }

    #[test]
    fn test_empty_input() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_headings_and_paragraphs_in_order() {
        let blocks = extract("<h1>Title</h1><p>First</p><h3> Sub </h3><p>Second</p>");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::header("Title", 1),
                ContentBlock::paragraph("First"),
                ContentBlock::header("Sub", 3),
                ContentBlock::paragraph("Second"),
            ]
        );
    }

    #[test]
    fn test_empty_heading_emits_nothing() {
        assert!(extract("<h2>   </h2><p></p>").is_empty());
    }

    #[test]
    fn test_whitespace_collapsed_and_br_kept() {
        let blocks = extract("<p>  one\n   two <br> three  </p>");
        assert_eq!(blocks, vec![ContentBlock::paragraph("one two\nthree")]);
    }

    #[test]
    fn test_title_script_style_suppressed() {
        let html = "<html><head><title>Page</title><style>p { color: red; }</style>\
                    <script>var x = 1;</script></head><body><p>Body</p></body></html>";
        assert_eq!(extract(html), vec![ContentBlock::paragraph("Body")]);
    }

    #[test]
    fn test_list_items() {
        let blocks = extract("<ul>\n  <li>One</li>\n  <li> </li>\n  <li>Two</li>\n</ul>");
        assert_eq!(blocks, vec![ContentBlock::list(["One", "Two"])]);
    }

    #[test]
    fn test_list_items_without_closing_tags() {
        let blocks = extract("<ol><li>One<li>Two</ol>");
        assert_eq!(blocks, vec![ContentBlock::list(["One", "Two"])]);
    }

    #[test]
    fn test_paragraph_inside_list_item_is_inline() {
        let blocks = extract("<ul><li><p>Wrapped</p></li></ul>");
        assert_eq!(blocks, vec![ContentBlock::list(["Wrapped"])]);
    }

    #[test]
    fn test_nested_list_flattened() {
        let blocks = extract("<ul><li>Parent<ul><li>Child</li></ul></li><li>Next</li></ul><p>After</p>");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::list(["Parent", "Child", "Next"]),
                ContentBlock::paragraph("After"),
            ]
        );
    }

    #[test]
    fn test_table_rows() {
        let blocks = extract(
            "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>",
        );
        assert_eq!(blocks, vec![ContentBlock::table([["A", "B"], ["1", "2"]])]);
    }

    #[test]
    fn test_table_heterogeneous_rows_and_empty_cells() {
        let blocks = extract(
            "<table><thead><tr><th>A</th><th>B</th><th>C</th></tr></thead>\
             <tbody><tr><td></td><td>2</td></tr><tr><td> </td></tr></tbody></table>",
        );
        assert_eq!(
            blocks,
            vec![ContentBlock::Table {
                rows: vec![
                    vec!["A".into(), "B".into(), "C".into()],
                    vec!["".into(), "2".into()],
                ]
            }]
        );
    }

    #[test]
    fn test_cell_without_row_opens_row() {
        let blocks = extract("<table><td>x</td><td>y</td></table>");
        assert_eq!(blocks, vec![ContentBlock::table([["x", "y"]])]);
    }

    #[test]
    fn test_orphan_rows_and_cells_ignored() {
        assert!(extract("<tr><td>x</td></tr>").is_empty());
        assert!(extract("<li>stray</li>").is_empty());
    }

    #[test]
    fn test_nested_table_text_joins_cell() {
        let blocks = extract(
            "<table><tr><td>outer <table><tr><td>inner</td></tr></table></td></tr></table><p>p</p>",
        );
        assert_eq!(
            blocks,
            vec![
                ContentBlock::table([["outer inner"]]),
                ContentBlock::paragraph("p"),
            ]
        );
    }

    #[test]
    fn test_reentrant_open_flushes_previous() {
        let blocks = extract("<p>Hello <h2>World</h2>");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::paragraph("Hello"),
                ContentBlock::header("World", 2),
            ]
        );
    }

    #[test]
    fn test_mismatched_closer_ignored() {
        let blocks = extract("<p>text</h3> more</p>");
        assert_eq!(blocks, vec![ContentBlock::paragraph("text more")]);
    }

    #[test]
    fn test_unclosed_block_flushed_as_paragraph() {
        assert_eq!(
            extract("<h1>Never closed"),
            vec![ContentBlock::paragraph("Never closed")]
        );
        assert_eq!(
            extract("<p>Done</p><p>trailing"),
            vec![
                ContentBlock::paragraph("Done"),
                ContentBlock::paragraph("trailing"),
            ]
        );
    }

    #[test]
    fn test_loose_text_only_left_to_fallback() {
        assert!(extract("Hello world").is_empty());
        assert!(extract("<div>only a div</div>").is_empty());
    }

    #[test]
    fn test_loose_text_as_paragraphs() {
        let extractor =
            StructuralExtractor::with_options(ExtractOptions::new().loose_text_as_paragraphs());
        let blocks = extractor.extract("<div>Intro</div><p>Body</p>outro");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::paragraph("Intro"),
                ContentBlock::paragraph("Body"),
                ContentBlock::paragraph("outro"),
            ]
        );
    }

    #[test]
    fn test_loose_text_kept_alongside_structure() {
        let blocks = extract("<h1>Pricing</h1><div class=\"card\">Basic plan costs $10</div>");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::header("Pricing", 1),
                ContentBlock::paragraph("Basic plan costs $10"),
            ]
        );
    }

    #[test]
    fn test_loose_text_keeps_source_order() {
        let blocks = extract("<div>lead</div><h2>Head</h2><span>middle</span><p>Body</p>tail");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::paragraph("lead"),
                ContentBlock::header("Head", 2),
                ContentBlock::paragraph("middle"),
                ContentBlock::paragraph("Body"),
                ContentBlock::paragraph("tail"),
            ]
        );
    }

    #[test]
    fn test_self_closing_raw_text_tags_suppress_nothing() {
        let blocks = extract("<title/><script src=\"a.js\"/><style/><h1>Heading</h1><p>Body</p>");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::header("Heading", 1),
                ContentBlock::paragraph("Body"),
            ]
        );
    }

    #[test]
    fn test_block_after_unclosed_list_flushes_list() {
        let blocks = extract("<ul><li>a</li><h2>Next</h2><p>Body text</p>");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::list(["a"]),
                ContentBlock::header("Next", 2),
                ContentBlock::paragraph("Body text"),
            ]
        );
    }

    #[test]
    fn test_block_after_unclosed_table_flushes_table() {
        let blocks = extract("<table><tr><td>x</td></tr><p>After</p><ul><li>i</li></ul>");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::table([["x"]]),
                ContentBlock::paragraph("After"),
                ContentBlock::list(["i"]),
            ]
        );
    }

    #[test]
    fn test_entities_decoded() {
        let blocks = extract("<p>A &amp; B&nbsp;C</p>");
        assert_eq!(blocks, vec![ContentBlock::paragraph("A & B C")]);
    }

    #[test]
    fn test_fresh_state_per_call() {
        let extractor = StructuralExtractor::new();
        let first = extractor.extract("<p>unterminated");
        let second = extractor.extract("<p>clean</p>");
        assert_eq!(first, vec![ContentBlock::paragraph("unterminated")]);
        assert_eq!(second, vec![ContentBlock::paragraph("clean")]);
    }
}
