//! Story assembly: block renderer plus the fallback decision.

use crate::model::{ContentBlock, ConversionStats, Story};
use crate::render::{BlockRenderer, FallbackExtractor, RenderOptions};

/// A story ready for layout, with what went into it.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Title block followed by body primitives
    pub story: Story,
    /// Block and fallback counts
    pub stats: ConversionStats,
}

/// Assemble the story for one document.
///
/// Blocks are rendered in order after the title. When nothing beyond the
/// title block was produced, paragraphs recovered by the fallback text
/// extractor are appended instead.
pub fn assemble_story(
    title: &str,
    html: &str,
    blocks: &[ContentBlock],
    options: &RenderOptions,
) -> Assembly {
    let renderer = BlockRenderer::new(&options.styles);
    let mut story = renderer.begin(title);
    let mut stats = ConversionStats::from_blocks(blocks);

    for block in blocks {
        renderer.render(block, &mut story);
    }

    if !story.has_body() {
        let paragraphs = FallbackExtractor::new(options.fallback_max_chars).paragraphs(html);
        if paragraphs.is_empty() {
            log::debug!("No structural or plain text content; emitting title only");
        } else {
            log::warn!(
                "No structural content found; using {} fallback paragraph(s)",
                paragraphs.len()
            );
        }
        renderer.render_fallback(&paragraphs, &mut story);
        stats.fallback_used = true;
        stats.fallback_paragraph_count = paragraphs.len() as u32;
    }

    Assembly { story, stats }
}
