//! Block renderer: maps content blocks onto styled layout primitives.

use crate::model::{ContentBlock, Flowable, Story, StyleSheet};
use crate::parser::decode_basic_entities;

/// Renders content blocks into a story using a fixed style sheet.
#[derive(Debug, Clone)]
pub struct BlockRenderer<'a> {
    styles: &'a StyleSheet,
}

impl<'a> BlockRenderer<'a> {
    /// Create a renderer over a style sheet.
    pub fn new(styles: &'a StyleSheet) -> Self {
        Self { styles }
    }

    /// Start a story with the title block.
    pub fn begin(&self, title: &str) -> Story {
        Story::with_title(title, self.styles)
    }

    /// Append the primitives for one block.
    ///
    /// Headers, paragraphs and non-empty lists/tables always contribute at
    /// least one primitive; a list without items or a table without rows
    /// contributes nothing.
    pub fn render(&self, block: &ContentBlock, story: &mut Story) {
        let styles = self.styles;
        match block {
            ContentBlock::Header { text, level } => {
                story.push(Flowable::paragraph(text.as_str(), styles.heading(*level)));
            }
            ContentBlock::Paragraph { text } => {
                story.push(Flowable::paragraph(
                    decode_basic_entities(text),
                    &styles.body,
                ));
            }
            ContentBlock::List { items } => {
                if items.is_empty() {
                    return;
                }
                for item in items {
                    let line = format!("{} {}", styles.bullet, item);
                    story.push(Flowable::paragraph(line, &styles.list_item));
                }
                story.push(Flowable::spacer(styles.list_spacer));
            }
            ContentBlock::Table { rows } => {
                if rows.is_empty() {
                    return;
                }
                story.push(Flowable::Table {
                    rows: rows.clone(),
                    style: styles.table.clone(),
                });
                story.push(Flowable::spacer(styles.table_spacer));
            }
        }
    }

    /// Append fallback paragraphs, each followed by a spacer.
    pub fn render_fallback(&self, paragraphs: &[String], story: &mut Story) {
        for text in paragraphs {
            story.push(Flowable::paragraph(text.as_str(), &self.styles.body));
            story.push(Flowable::spacer(self.styles.fallback_spacer));
        }
    }
}

/// Build a story from a title and blocks, in document order.
pub fn build_story(title: &str, blocks: &[ContentBlock], styles: &StyleSheet) -> Story {
    let renderer = BlockRenderer::new(styles);
    let mut story = renderer.begin(title);
    for block in blocks {
        renderer.render(block, &mut story);
    }
    story
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(story: &Story) -> Vec<String> {
        story
            .body()
            .iter()
            .filter_map(|f| match f {
                Flowable::Paragraph { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_header_uses_level_style() {
        let styles = StyleSheet::default();
        let story = build_story("T", &[ContentBlock::header("Intro", 3)], &styles);
        match &story.body()[0] {
            Flowable::Paragraph { text, style } => {
                assert_eq!(text, "Intro");
                assert_eq!(style.name, "h3");
                assert_eq!(style.font_size, 16.0);
            }
            other => panic!("Expected heading paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_paragraph_basic_entities() {
        let styles = StyleSheet::default();
        let story = build_story(
            "T",
            &[ContentBlock::paragraph("A &amp; B&nbsp;C")],
            &styles,
        );
        assert_eq!(texts(&story), vec!["A & B C"]);
    }

    #[test]
    fn test_list_items_bulleted_then_spacer() {
        let styles = StyleSheet::default();
        let story = build_story("T", &[ContentBlock::list(["a", "b", "c"])], &styles);
        assert_eq!(story.body().len(), 4);
        assert_eq!(
            texts(&story),
            vec!["\u{2022} a", "\u{2022} b", "\u{2022} c"]
        );
        assert_eq!(story.body()[3], Flowable::spacer(10.0));
    }

    #[test]
    fn test_table_then_spacer() {
        let styles = StyleSheet::default();
        let story = build_story(
            "T",
            &[ContentBlock::table([vec!["A", "B"], vec!["1", "2"]])],
            &styles,
        );
        assert_eq!(story.table_count(), 1);
        assert_eq!(story.body()[1], Flowable::spacer(15.0));
    }

    #[test]
    fn test_empty_collections_contribute_nothing() {
        let styles = StyleSheet::default();
        let blocks = vec![
            ContentBlock::List { items: vec![] },
            ContentBlock::Table { rows: vec![] },
        ];
        let story = build_story("T", &blocks, &styles);
        assert!(!story.has_body());
    }

    #[test]
    fn test_fallback_paragraphs_spaced() {
        let styles = StyleSheet::default();
        let renderer = BlockRenderer::new(&styles);
        let mut story = renderer.begin("T");
        renderer.render_fallback(&["one".to_string(), "two".to_string()], &mut story);
        assert_eq!(story.body().len(), 4);
        assert_eq!(story.body()[1], Flowable::spacer(12.0));
        assert_eq!(story.paragraph_count(), 2);
    }
}
