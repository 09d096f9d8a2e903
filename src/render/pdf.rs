//! PDF serialization of laid-out pages.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::fonts::encode_win_ansi;
use super::layout::{DrawOp, PageLayout};
use super::options::RenderOptions;
use crate::error::{Error, Result};
use crate::model::{Color, Font};

/// Value written to the `/Producer` entry.
pub const PRODUCER: &str = concat!("htmlpdf ", env!("CARGO_PKG_VERSION"));

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn color_operands(color: Color) -> Vec<Object> {
    vec![real(color.r), real(color.g), real(color.b)]
}

/// Build the content stream operations for one page.
fn page_operations(page: &PageLayout) -> (Vec<Operation>, usize) {
    let mut ops = Vec::with_capacity(page.ops.len() * 6);
    let mut replaced = 0;

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                color,
                word_spacing,
                text,
            } => {
                let encoded = encode_win_ansi(text);
                replaced += encoded.replaced;
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![Object::Name(font.resource_name().into()), real(*size)],
                ));
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new("Tw", vec![real(*word_spacing)]));
                ops.push(Operation::new("Td", vec![real(*x), real(*y)]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encoded.bytes, StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new(
                    "re",
                    vec![real(*x), real(*y), real(*width), real(*height)],
                ));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height,
                line_width,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(Operation::new("w", vec![real(*line_width)]));
                ops.push(Operation::new(
                    "re",
                    vec![real(*x), real(*y), real(*width), real(*height)],
                ));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }

    (ops, replaced)
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn content_stream(page: &PageLayout, options: &RenderOptions) -> Result<(Stream, usize)> {
    let (operations, replaced) = page_operations(page);
    let data = Content { operations }
        .encode()
        .map_err(|e| Error::Pdf(format!("content encoding failed: {}", e)))?;

    let stream = if options.compress {
        Stream::new(dictionary! { "Filter" => "FlateDecode" }, compress(&data)?)
    } else {
        Stream::new(Dictionary::new(), data)
    };
    Ok((stream, replaced))
}

fn font_resources(doc: &mut Document) -> ObjectId {
    let mut fonts = Dictionary::new();
    for font in Font::all() {
        let id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), id);
    }
    doc.add_object(dictionary! { "Font" => fonts })
}

/// Serialize laid-out pages into a PDF.
///
/// The Info dictionary carries only `/Title` and `/Producer`, so identical
/// input always produces identical bytes.
pub fn write_pdf(pages: &[PageLayout], title: &str, options: &RenderOptions) -> Result<Vec<u8>> {
    if pages.is_empty() {
        return Err(Error::Layout("document has no pages".to_string()));
    }

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let resources_id = font_resources(&mut doc);

    let mut kids = Vec::with_capacity(pages.len());
    let mut replaced = 0;

    for page in pages {
        let (stream, page_replaced) = content_stream(page, options)?;
        replaced += page_replaced;
        let content_id = doc.add_object(stream);
        let media_box = vec![
            Object::Integer(0),
            Object::Integer(0),
            real(page.width),
            real(page.height),
        ];
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    if replaced > 0 {
        log::warn!(
            "{} character(s) not representable in WinAnsiEncoding were replaced with '?'",
            replaced
        );
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title).bytes, StringFormat::Literal),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    log::debug!("Serialized {} page(s), {} bytes", pages.len(), buffer.len());
    Ok(buffer)
}
