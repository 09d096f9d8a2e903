//! Standard 14 font metrics and WinAnsi text encoding.
//!
//! Widths are Adobe AFM advance widths in 1/1000 em for the printable
//! ASCII range. Everything else falls back to a per-glyph table below.

use unicode_normalization::UnicodeNormalization;

use crate::model::Font;

/// Byte written for characters WinAnsiEncoding cannot represent.
pub const REPLACEMENT_BYTE: u8 = b'?';

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// WinAnsiEncoding code points 0x80..=0x9F that differ from Latin-1.
const WIN_ANSI_HIGH: &[(char, u8)] = &[
    ('\u{20ac}', 0x80),
    ('\u{201a}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201e}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02c6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017d}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201c}', 0x93),
    ('\u{201d}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02dc}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203a}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017e}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// Widths for encoded bytes outside printable ASCII.
fn extended_width(byte: u8) -> u16 {
    match byte {
        0x85 | 0x89 | 0x97 => 1000,
        0x80 | 0x96 => 556,
        0x82 | 0x91 | 0x92 => 222,
        0x84 | 0x93 | 0x94 => 333,
        0x95 => 350,
        0x99 => 1000,
        0xA0 => 278,
        0xA9 | 0xAE => 737,
        0xB0 => 400,
        0xB7 => 278,
        _ => 556,
    }
}

/// Encode one character into WinAnsiEncoding.
pub fn encode_char(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        0x09 => Some(b' '),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, b)| *b),
    }
}

/// Decode a single WinAnsiEncoding byte.
pub fn decode_byte(byte: u8) -> char {
    match byte {
        0x80..=0x9F => WIN_ANSI_HIGH
            .iter()
            .find(|(_, b)| *b == byte)
            .map(|(c, _)| *c)
            .unwrap_or('\u{fffd}'),
        _ => byte as char,
    }
}

/// Decode WinAnsiEncoding bytes back into text.
pub fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| decode_byte(b)).collect()
}

/// Text encoded for a simple font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    /// Encoded bytes
    pub bytes: Vec<u8>,
    /// Characters replaced by [`REPLACEMENT_BYTE`]
    pub replaced: usize,
}

/// Encode text into WinAnsiEncoding after NFC normalization.
///
/// Unrepresentable characters become `?`; composed forms are tried first
/// so that `e` + combining acute still encodes as a single byte.
pub fn encode_win_ansi(text: &str) -> EncodedText {
    let mut bytes = Vec::with_capacity(text.len());
    let mut replaced = 0;

    for ch in text.nfc() {
        match encode_char(ch) {
            Some(b) => bytes.push(b),
            None => {
                bytes.push(REPLACEMENT_BYTE);
                replaced += 1;
            }
        }
    }

    EncodedText { bytes, replaced }
}

/// Advance width of an encoded byte in 1/1000 em.
pub fn glyph_width(font: Font, byte: u8) -> u16 {
    let table = match font {
        Font::Helvetica => &HELVETICA_WIDTHS,
        Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
    };
    match byte {
        0x20..=0x7E => table[(byte - 0x20) as usize],
        _ => extended_width(byte),
    }
}

/// Advance width of a character in 1/1000 em.
pub fn char_width(font: Font, ch: char) -> u16 {
    glyph_width(font, encode_char(ch).unwrap_or(REPLACEMENT_BYTE))
}

/// Width of `text` in points when set in `font` at `size`.
///
/// Expects already-normalized text.
pub fn text_width(font: Font, size: f32, text: &str) -> f32 {
    let units: u32 = text.chars().map(|ch| char_width(font, ch) as u32).sum();
    units as f32 * size / 1000.0
}
