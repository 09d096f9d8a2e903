//! End-to-end conversion tests that read the produced PDFs back.

#![cfg(feature = "pdf")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lopdf::content::Content;
use lopdf::{Document, Object};

use htmlpdf::render::decode_win_ansi;
use htmlpdf::{
    convert, try_convert, ContentBlock, ContentExtractor, ConversionJob, Converter, HtmlPdf,
    RenderOptions, StructuralExtractor,
};

/// Every string shown with `Tj`, page by page, in drawing order.
fn shown_text(pdf: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(pdf).unwrap();
    let mut strings = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let data = doc.get_page_content(page_id).unwrap();
        let content = Content::decode(&data).unwrap();
        for op in content.operations {
            if op.operator == "Tj" {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    strings.push(decode_win_ansi(bytes).replace('\u{a0}', " "));
                }
            }
        }
    }
    strings
}

fn operator_count(pdf: &[u8], operator: &str) -> usize {
    let doc = Document::load_mem(pdf).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let data = doc.get_page_content(page_id).unwrap();
            Content::decode(&data)
                .unwrap()
                .operations
                .iter()
                .filter(|op| op.operator == operator)
                .count()
        })
        .sum()
}

struct CountingExtractor {
    calls: Arc<AtomicUsize>,
}

impl ContentExtractor for CountingExtractor {
    fn extract(&self, html: &str) -> Vec<ContentBlock> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StructuralExtractor::new().extract(html)
    }
}

#[test]
fn test_structured_document() {
    let html = "<h1>Sales</h1><p>Up 10%</p><ul><li>North</li><li>South</li></ul>";
    let doc = try_convert(html, Some("Quarterly Report")).unwrap();

    assert_eq!(doc.title, "Quarterly Report");
    assert_eq!(doc.page_count, 1);
    assert_eq!(doc.stats.heading_count, 1);
    assert_eq!(doc.stats.paragraph_count, 1);
    assert_eq!(doc.stats.list_item_count, 2);
    assert!(!doc.stats.fallback_used);

    let text = shown_text(&doc.bytes);
    assert_eq!(
        text,
        vec!["Quarterly Report", "Sales", "Up 10%", "• North", "• South"]
    );
}

#[test]
fn test_empty_input_renders_title_only() {
    let pdf = convert("", None).unwrap();
    assert_eq!(shown_text(&pdf), vec!["Document"]);
    assert_eq!(Document::load_mem(&pdf).unwrap().get_pages().len(), 1);
}

#[test]
fn test_whitespace_title_defaults() {
    let pdf = convert("<p>x</p>", Some("   ")).unwrap();
    assert_eq!(shown_text(&pdf)[0], "Document");
}

#[test]
fn test_plain_text_uses_fallback() {
    let doc = try_convert("Hello world", Some("Note")).unwrap();
    assert!(doc.stats.fallback_used);
    assert_eq!(doc.stats.fallback_paragraph_count, 1);
    assert_eq!(shown_text(&doc.bytes), vec!["Note", "Hello world"]);
}

#[test]
fn test_unstructured_markup_uses_fallback() {
    let pdf = convert("<div>alpha <span>beta</span></div>", None).unwrap();
    assert_eq!(shown_text(&pdf), vec!["Document", "alpha beta"]);
}

#[test]
fn test_loose_text_rendered_after_heading() {
    let doc = try_convert(
        "<h1>Pricing</h1><div class=\"card\">Basic plan costs $10</div>",
        None,
    )
    .unwrap();
    assert!(!doc.stats.fallback_used);
    assert_eq!(
        shown_text(&doc.bytes),
        vec!["Document", "Pricing", "Basic plan costs $10"]
    );
}

#[test]
fn test_fallback_truncation() {
    let html = "abcd ".repeat(300);
    let doc = try_convert(&html, None).unwrap();
    assert!(doc.stats.fallback_used);

    let text = shown_text(&doc.bytes);
    let body = text[1..].join(" ");
    assert_eq!(body.chars().count(), 1003);
    assert!(body.ends_with("..."));
}

#[test]
fn test_entities_decoded() {
    let pdf = convert("<p>A &amp; B&nbsp;C</p>", None).unwrap();
    assert_eq!(shown_text(&pdf), vec!["Document", "A & B C"]);
}

#[test]
fn test_table_grid() {
    let html = "<table><tr><th>Name</th><th>Qty</th></tr><tr><td>Bolt</td><td>4</td></tr></table>";
    let doc = try_convert(html, None).unwrap();

    assert_eq!(doc.stats.table_count, 1);
    assert_eq!(doc.stats.table_row_count, 2);
    assert_eq!(
        shown_text(&doc.bytes),
        vec!["Document", "Name", "Qty", "Bolt", "4"]
    );
    assert_eq!(operator_count(&doc.bytes, "S"), 4);
}

#[test]
fn test_long_document_paginates() {
    let html: String = (0..150)
        .map(|i| format!("<p>Paragraph {} with enough words to take up a line.</p>", i))
        .collect();
    let doc = try_convert(&html, None).unwrap();

    assert!(doc.page_count > 1);
    let loaded = Document::load_mem(&doc.bytes).unwrap();
    assert_eq!(loaded.get_pages().len() as u32, doc.page_count);

    let text = shown_text(&doc.bytes);
    assert_eq!(text.len(), 151);
    assert_eq!(text[150], "Paragraph 149 with enough words to take up a line.");
}

#[test]
fn test_conversion_is_deterministic() {
    let html = "<h2>Intro</h2><p>Same bytes every time.</p><ol><li>one</li></ol>";
    let first = convert(html, Some("Stable")).unwrap();
    let second = convert(html, Some("Stable")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_backend_unavailable_skips_extraction() {
    let calls = Arc::new(AtomicUsize::new(0));
    let converter = Converter::new(RenderOptions::default())
        .with_extractor(Box::new(CountingExtractor {
            calls: Arc::clone(&calls),
        }))
        .with_backend_available(false);

    assert!(!converter.is_available());
    assert!(converter.convert("<p>ignored</p>", None).is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_custom_extractor_used() {
    let calls = Arc::new(AtomicUsize::new(0));
    let converter = Converter::default().with_extractor(Box::new(CountingExtractor {
        calls: Arc::clone(&calls),
    }));

    assert!(converter.convert("<p>x</p>", None).is_some());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_batch_keeps_order() {
    let jobs: Vec<ConversionJob> = (0..8)
        .map(|i| ConversionJob::new(format!("<p>Item {}</p>", i), Some(format!("Doc {}", i))))
        .collect();
    let results = Converter::default().convert_batch(&jobs);

    assert_eq!(results.len(), 8);
    for (i, result) in results.iter().enumerate() {
        let text = shown_text(result.as_ref().unwrap());
        assert_eq!(text, vec![format!("Doc {}", i), format!("Item {}", i)]);
    }
}

#[test]
fn test_builder_a4_media_box() {
    let pdf = HtmlPdf::new()
        .with_page_size(htmlpdf::PageSize::A4)
        .convert("<p>x</p>")
        .unwrap();
    let doc = Document::load_mem(&pdf).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let media_box = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .clone();
    let dims: Vec<f32> = media_box.iter().map(|o| o.as_float().unwrap()).collect();
    assert_eq!(dims, vec![0.0, 0.0, 595.0, 842.0]);
}
