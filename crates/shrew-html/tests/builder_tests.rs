//! Integration tests for the tree builder and its recovery rules.

use shrew_dom::NodeId;
use shrew_html::{Document, SerializeOptions};

/// Helper to parse with the default configuration.
fn parse(html: &str) -> Document {
    Document::parse(html)
}

/// Helper to re-serialize with everything at defaults.
fn html(document: &Document) -> String {
    document.serialize(&SerializeOptions::default())
}

#[test]
fn test_nested_structure() {
    let document = parse("<div><p>Text</p></div>");
    let div = document.find("div").unwrap()[0];
    let p = document.child_elements(div)[0];
    assert_eq!(document.tag_name(p), Some("p"));
    assert_eq!(document.text_of(p), vec!["Text".to_string()]);
}

#[test]
fn test_void_element_never_has_children() {
    let document = parse(r#"<img src="x">text"#);
    let img = document.find("img").unwrap()[0];
    let element = document.tree().as_element(img).unwrap();
    assert_eq!(element.singleton.as_deref(), Some(">"));
    assert!(document.tree().children(img).is_empty());
    // The text lands beside the img, not inside it.
    assert_eq!(html(&document), r#"<img src="x">text"#);
}

#[test]
fn test_void_element_close_tag_never_emitted() {
    let document = parse(r#"<img src="x">"#);
    assert_eq!(html(&document), r#"<img src="x">"#);
}

#[test]
fn test_self_closed_keeps_marker() {
    let document = parse("<div/>after");
    assert_eq!(html(&document), "<div/>after");
}

#[test]
fn test_implicit_close_between_siblings() {
    let document = parse("<p>a<p>b");
    let paragraphs = document.find("p").unwrap();
    assert_eq!(paragraphs.len(), 2);
    // Both are top-level siblings, not nested.
    for &p in &paragraphs {
        assert_eq!(document.tree().parent(p), Some(NodeId::ROOT));
    }
    let first = document.tree().as_element(paragraphs[0]).unwrap();
    let second = document.tree().as_element(paragraphs[1]).unwrap();
    assert!(!first.explicit_close);
    assert!(second.explicit_close);
    assert_eq!(html(&document), "<p>a<p>b</p>");
}

#[test]
fn test_implicit_close_inside_list() {
    let document = parse("<ul><li>a<li>b</ul>");
    let ul = document.find("ul").unwrap()[0];
    let items = document.child_elements(ul);
    assert_eq!(items.len(), 2);
    assert_eq!(html(&document), "<ul><li>a<li>b</ul>");
}

#[test]
fn test_mismatched_close_recovers_both_levels() {
    let document = parse("<b><i>text</b>");
    let b = document.find("b").unwrap()[0];
    let i = document.child_elements(b)[0];
    assert_eq!(document.tag_name(i), Some("i"));
    // The inner element is recovered, not dropped; since `i` cannot omit
    // its end tag the serializer synthesizes it.
    assert!(document.tree().as_element(i).unwrap().explicit_close);
    assert_eq!(html(&document), "<b><i>text</i></b>");
}

#[test]
fn test_unclosed_at_end_of_input() {
    let document = parse("<div><p>x");
    assert_eq!(html(&document), "<div><p>x</p></div>");
}

#[test]
fn test_attribute_entities_decoded() {
    let document = parse(r#"<a title="a&amp;b &#62; c">x</a>"#);
    let a = document.find("a").unwrap()[0];
    assert_eq!(document.attribute(a, "title"), Some(Some("a&b > c")));
}

#[test]
fn test_boolean_attribute_has_no_value() {
    let document = parse("<input disabled>");
    let input = document.find("input").unwrap()[0];
    assert_eq!(document.attribute(input, "disabled"), Some(None));
    assert_eq!(document.attribute(input, "checked"), None);
}

#[test]
fn test_duplicate_attribute_last_value_wins() {
    let document = parse(r#"<a x="1" x="2">y</a>"#);
    let a = document.find("a").unwrap()[0];
    let element = document.tree().as_element(a).unwrap();
    assert_eq!(element.attributes.len(), 1);
    assert_eq!(element.attributes.get("x"), Some(Some("2")));
}

#[test]
fn test_raw_content_is_not_parsed() {
    let document = parse("<script>var a = '<div>';</script>");
    assert!(document.find("div").unwrap().is_empty());
    assert_eq!(html(&document), "<script>var a = '<div>';</script>");
}

#[test]
fn test_stray_close_tag_discarded_at_top_level() {
    let document = parse("</div><p>x</p>");
    assert_eq!(html(&document), "<p>x</p>");
}

#[test]
fn test_close_tag_case_insensitive() {
    let document = parse("<DIV>x</div>");
    let div = document.find("div").unwrap()[0];
    assert!(document.tree().as_element(div).unwrap().explicit_close);
    assert_eq!(html(&document), "<DIV>x</DIV>");
}

#[test]
fn test_text_extraction_order_and_decoding() {
    let document = parse("<div>Hello <b>World</b><!-- c --> &amp; you</div>");
    assert_eq!(
        document.text(),
        vec![
            "Hello ".to_string(),
            "World".to_string(),
            " & you".to_string(),
        ]
    );
}
