//! HTML character reference decoding.

use std::borrow::Cow;

/// Longest named reference we look for, including the trailing `;`.
const MAX_REFERENCE_LEN: usize = 12;

/// Named references recognised in text. Unknown names are left verbatim.
const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("copy", '\u{a9}'),
    ("reg", '\u{ae}'),
    ("trade", '\u{2122}'),
    ("hellip", '\u{2026}'),
    ("mdash", '\u{2014}'),
    ("ndash", '\u{2013}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'),
    ("bull", '\u{2022}'),
    ("middot", '\u{b7}'),
    ("euro", '\u{20ac}'),
    ("pound", '\u{a3}'),
    ("yen", '\u{a5}'),
    ("cent", '\u{a2}'),
    ("sect", '\u{a7}'),
    ("deg", '\u{b0}'),
    ("plusmn", '\u{b1}'),
    ("times", '\u{d7}'),
    ("divide", '\u{f7}'),
    ("laquo", '\u{ab}'),
    ("raquo", '\u{bb}'),
    ("iexcl", '\u{a1}'),
    ("iquest", '\u{bf}'),
];

/// Decode character references (`&amp;`, `&#169;`, `&#xA9;`) in text.
///
/// Returns the input unchanged (borrowed) when it contains no `&`.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];

        match decode_reference(tail) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

/// Decode one reference at the start of `tail` (the text after `&`).
///
/// Returns the character and the number of bytes consumed, including `;`.
fn decode_reference(tail: &str) -> Option<(char, usize)> {
    let window = &tail[..floor_char_boundary(tail, MAX_REFERENCE_LEN)];
    let semi = window.find(';')?;
    let name = &tail[..semi];

    let ch = if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        char::from_u32(code).unwrap_or('\u{fffd}')
    } else {
        NAMED.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)?
    };

    Some((ch, semi + 1))
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Decode the two references body text must never show literally.
///
/// Applied by the renderer to paragraph text right before layout.
pub fn decode_basic_entities(text: &str) -> String {
    text.replace("&nbsp;", " ").replace("&amp;", "&")
}
