//! HTML download cleaner and prettifier.
//!
//! Both are plain string rewrites; neither builds a DOM.

use regex::Regex;

/// Indentation unit used by [`prettify`].
pub const INDENT: &str = "    ";

/// Elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Prepares user-supplied HTML for download as a standalone file.
pub struct HtmlCleaner {
    style_pattern: Regex,
    script_pattern: Regex,
}

impl HtmlCleaner {
    /// Create a cleaner.
    pub fn new() -> Self {
        Self {
            style_pattern: Regex::new(r"(?is)<style[^>]*>(.*?)</style>").unwrap(),
            script_pattern: Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap(),
        }
    }

    /// Bodies of every `<style>` element, in document order.
    pub fn extract_styles(&self, html: &str) -> Vec<String> {
        self.style_pattern
            .captures_iter(html)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }

    /// Remove scripts and consolidate all CSS into one `<style>` in `<head>`.
    ///
    /// When there is no `<head>`, one is synthesized right after `<html>`.
    /// When neither anchor exists, style elements are left where they are
    /// and only scripts are removed.
    pub fn clean(&self, html: &str) -> String {
        let styles = self.extract_styles(html);
        let without_scripts = self.script_pattern.replace_all(html, "");

        if styles.is_empty() {
            return without_scripts.into_owned();
        }

        let css = styles.join("\n");

        if without_scripts.contains("<head>") {
            let stripped = self.style_pattern.replace_all(&without_scripts, "");
            return stripped.replacen("<head>", &format!("<head>\n<style>\n{}\n</style>", css), 1);
        }

        if without_scripts.contains("<html>") {
            let stripped = self.style_pattern.replace_all(&without_scripts, "");
            return stripped.replacen(
                "<html>",
                &format!("<html>\n<head>\n<style>\n{}\n</style>\n</head>", css),
                1,
            );
        }

        log::debug!("No <head> or <html> anchor; leaving {} style block(s) in place", styles.len());
        without_scripts.into_owned()
    }
}

impl Default for HtmlCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Clean HTML for download. See [`HtmlCleaner::clean`].
pub fn clean_for_download(html: &str) -> String {
    HtmlCleaner::new().clean(html)
}

fn tag_name(line: &str) -> &str {
    let rest = line.trim_start_matches('<').trim_start_matches('/');
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(rest.len());
    &rest[..end]
}

fn opens_level(line: &str) -> bool {
    if line.ends_with('{') {
        return true;
    }
    if !line.starts_with('<') || line.starts_with("</") || line.starts_with("<!") {
        return false;
    }
    if line.ends_with("/>") || line.contains("</") {
        return false;
    }
    let name = tag_name(line).to_ascii_lowercase();
    !VOID_ELEMENTS.contains(&name.as_str())
}

fn closes_level(line: &str) -> bool {
    line.starts_with("</") || line.starts_with('}')
}

/// Break markup onto one tag per line and indent nested elements.
///
/// Naive by construction: a line opening an element indents what follows
/// until a line starting with a closing tag (or `}` in CSS).
pub fn prettify(html: &str) -> String {
    let between_tags = Regex::new(r">\s*<").unwrap();
    let split = between_tags.replace_all(html, ">\n<");

    let mut level: usize = 0;
    let mut lines = Vec::new();

    for line in split.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if closes_level(line) {
            level = level.saturating_sub(1);
        }
        lines.push(format!("{}{}", INDENT.repeat(level), line));
        if opens_level(line) {
            level += 1;
        }
    }

    lines.join("\n")
}
