//! Pull-based HTML tokenizer.
//!
//! The tokenizer never fails: markup it cannot make sense of is passed
//! through as text, and input ending inside a tag still yields that tag.

use std::borrow::Cow;

use super::entities::decode_entities;

/// Elements whose content is raw text up to the matching close tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "title", "textarea"];

/// A single HTML token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// An opening tag; `name` is lowercased
    StartTag {
        /// Tag name
        name: String,
        /// Whether the tag ended with `/>`
        self_closing: bool,
    },

    /// A closing tag; `name` is lowercased
    EndTag {
        /// Tag name
        name: String,
    },

    /// Character data between tags, with references decoded
    Text(Cow<'a, str>),
}

/// Iterator over the tokens of an HTML string.
///
/// Comments, doctypes and processing instructions are skipped. Attributes
/// are parsed only far enough to find the end of the tag.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    raw_text_until: Option<String>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            raw_text_until: None,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn is_markup_start(&self, at: usize) -> bool {
        let bytes = self.bytes();
        if bytes.get(at) != Some(&b'<') {
            return false;
        }
        match bytes.get(at + 1) {
            Some(b) if b.is_ascii_alphabetic() => true,
            Some(b'!') | Some(b'?') => true,
            Some(b'/') => bytes
                .get(at + 2)
                .map(|b| b.is_ascii_alphabetic())
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Skip `<!-- ... -->`, `<!...>` and `<?...>`.
    fn skip_declaration(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos = if rest.starts_with("<!--") {
            match rest[4..].find("-->") {
                Some(end) => self.pos + 4 + end + 3,
                None => self.input.len(),
            }
        } else {
            match rest.find('>') {
                Some(end) => self.pos + end + 1,
                None => self.input.len(),
            }
        };
    }

    fn read_name(&mut self) -> String {
        let bytes = self.bytes();
        let start = self.pos;
        while self.pos < bytes.len()
            && (bytes[self.pos].is_ascii_alphanumeric()
                || bytes[self.pos] == b'-'
                || bytes[self.pos] == b':')
        {
            self.pos += 1;
        }
        self.input[start..self.pos].to_ascii_lowercase()
    }

    /// Advance past attributes to just after `>`; returns whether the tag self-closed.
    fn skip_attributes(&mut self) -> bool {
        let bytes = self.bytes();
        let mut self_closing = false;

        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'>' => {
                    self.pos += 1;
                    return self_closing;
                }
                b'/' => {
                    self_closing = true;
                    self.pos += 1;
                }
                quote @ (b'"' | b'\'') => {
                    self.pos += 1;
                    while self.pos < bytes.len() && bytes[self.pos] != quote {
                        self.pos += 1;
                    }
                    self.pos = (self.pos + 1).min(bytes.len());
                    self_closing = false;
                }
                b if b.is_ascii_whitespace() => self.pos += 1,
                _ => {
                    self_closing = false;
                    self.pos += 1;
                }
            }
        }
        self_closing
    }

    fn read_start_tag(&mut self) -> Token<'a> {
        self.pos += 1;
        let name = self.read_name();
        let self_closing = self.skip_attributes();

        if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            self.raw_text_until = Some(name.clone());
        }
        Token::StartTag { name, self_closing }
    }

    fn read_end_tag(&mut self) -> Token<'a> {
        self.pos += 2;
        let name = self.read_name();
        let rest = &self.input[self.pos..];
        self.pos = match rest.find('>') {
            Some(end) => self.pos + end + 1,
            None => self.input.len(),
        };
        Token::EndTag { name }
    }

    /// Raw text runs to the next `</name` (case-insensitive) or end of input.
    fn read_raw_text(&mut self, name: &str) -> &'a str {
        let input: &'a str = self.input;
        let start = self.pos;
        let needle = format!("</{}", name);
        let haystack = input[start..].to_ascii_lowercase();
        let end = haystack
            .find(&needle)
            .map(|i| start + i)
            .unwrap_or(input.len());
        self.pos = end;
        &input[start..end]
    }

    fn read_text(&mut self) -> &'a str {
        let input: &'a str = self.input;
        let start = self.pos;
        // A '<' that does not open markup is literal text.
        let first_len = input[start..].chars().next().map_or(1, char::len_utf8);
        let mut cursor = start + first_len;
        while let Some(offset) = input[cursor..].find('<') {
            let at = cursor + offset;
            if self.is_markup_start(at) {
                self.pos = at;
                return &input[start..at];
            }
            cursor = at + 1;
        }
        self.pos = input.len();
        &input[start..]
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.pos >= self.input.len() {
                return None;
            }

            if let Some(name) = self.raw_text_until.take() {
                let raw = self.read_raw_text(&name);
                if raw.is_empty() {
                    continue;
                }
                return Some(Token::Text(Cow::Borrowed(raw)));
            }

            if self.is_markup_start(self.pos) {
                let bytes = self.bytes();
                match bytes[self.pos + 1] {
                    b'!' | b'?' => {
                        self.skip_declaration();
                        continue;
                    }
                    b'/' => return Some(self.read_end_tag()),
                    _ => return Some(self.read_start_tag()),
                }
            }

            let text = self.read_text();
            return Some(Token::Text(decode_entities(text)));
        }
    }
}
