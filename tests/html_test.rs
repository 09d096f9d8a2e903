//! Integration tests for the download cleaner and prettifier.

use htmlpdf::html::{HtmlCleaner, INDENT};
use htmlpdf::{clean_for_download, prettify};

const CARD: &str = "<html><head><meta charset=\"utf-8\"></head><body>\
<style>.card { padding: 8px; }</style>\
<div class=\"card\"><h2>Title</h2><p>Body</p></div>\
<script>console.log('x');</script>\
<style>.card h2 { margin: 0; }</style>\
</body></html>";

#[test]
fn test_clean_card_snippet() {
    let cleaned = clean_for_download(CARD);

    assert!(!cleaned.contains("<script"));
    assert_eq!(cleaned.matches("<style>").count(), 1);
    assert!(cleaned.starts_with(
        "<html><head>\n<style>\n.card { padding: 8px; }\n.card h2 { margin: 0; }\n</style><meta"
    ));
    assert!(cleaned.contains("<body><div class=\"card\"><h2>Title</h2><p>Body</p></div></body>"));
}

#[test]
fn test_clean_is_stable() {
    let once = clean_for_download(CARD);
    let twice = clean_for_download(&once);
    assert_eq!(twice.matches("<style>").count(), 1);
    assert!(!twice.contains("<script"));
}

#[test]
fn test_extract_styles_order() {
    let styles = HtmlCleaner::new().extract_styles(CARD);
    assert_eq!(styles, vec![".card { padding: 8px; }", ".card h2 { margin: 0; }"]);
}

#[test]
fn test_prettify_card() {
    let pretty = prettify("<div class=\"card\"><h2>Title</h2><p>Body</p></div>");
    let expected = format!(
        "<div class=\"card\">\n{i}<h2>Title</h2>\n{i}<p>Body</p>\n</div>",
        i = INDENT
    );
    assert_eq!(pretty, expected);
}

#[test]
fn test_prettify_then_clean() {
    let pretty = prettify(CARD);
    let cleaned = clean_for_download(&pretty);
    assert!(!cleaned.contains("console.log"));
    assert!(cleaned.contains(".card h2 { margin: 0; }"));
}
