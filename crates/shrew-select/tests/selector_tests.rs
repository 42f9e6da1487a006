//! Integration tests for selector parsing and matching.

use shrew_html::Document;
use shrew_select::{AttributeOp, Combinator, Predicate, Selector, SelectorError};

/// Helper: the tag names of matched nodes, in result order.
fn found_names(document: &Document, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .find_selector(&selector)
        .iter()
        .map(|&n| document.tag_name(n).unwrap().to_string())
        .collect()
}

#[test]
fn test_parse_descendant_and_child() {
    let selector = Selector::parse("div > p span").unwrap();
    let segments = selector.segments();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].combinator, None);
    assert_eq!(segments[0].predicate, Predicate::Tag("div".to_string()));
    assert_eq!(segments[1].combinator, Some(Combinator::Child));
    assert_eq!(segments[2].combinator, Some(Combinator::Descendant));
}

#[test]
fn test_parse_compound_has_no_combinator() {
    let selector = Selector::parse("p.note#intro").unwrap();
    let segments = selector.segments();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[1].combinator, None);
    assert_eq!(segments[1].predicate, Predicate::Class("note".to_string()));
    assert_eq!(segments[2].combinator, None);
    assert_eq!(segments[2].predicate, Predicate::Id("intro".to_string()));
}

#[test]
fn test_parse_attribute_operators() {
    let selector = Selector::parse(r#"[href^="https"]"#).unwrap();
    assert_eq!(
        selector.segments()[0].predicate,
        Predicate::Attribute {
            name: "href".to_string(),
            test: Some((AttributeOp::Prefix, "https".to_string())),
        }
    );
    let selector = Selector::parse("[disabled]").unwrap();
    assert_eq!(
        selector.segments()[0].predicate,
        Predicate::Attribute {
            name: "disabled".to_string(),
            test: None,
        }
    );
}

#[test]
fn test_parse_errors_are_typed() {
    assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
    assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
    assert_eq!(
        Selector::parse(":hover"),
        Err(SelectorError::UnknownPseudoClass("hover".to_string()))
    );
    assert_eq!(
        Selector::parse("div >"),
        Err(SelectorError::DanglingCombinator)
    );
    assert_eq!(
        Selector::parse("[href"),
        Err(SelectorError::UnterminatedAttribute)
    );
    assert!(matches!(
        Selector::parse("[href^https]"),
        Err(SelectorError::ExpectedEquals { .. })
    ));
    assert!(matches!(
        Selector::parse("div ~ p"),
        Err(SelectorError::UnexpectedCharacter { ch: '~', .. })
    ));
}

#[test]
fn test_no_match_is_empty_not_error() {
    let document = Document::parse("<div><p>x</p></div>");
    assert!(found_names(&document, "table").is_empty());
}

#[test]
fn test_descendant_vs_child() {
    let document = Document::parse("<div><p><span></span></p></div>");
    assert_eq!(found_names(&document, "div > p"), vec!["p"]);
    assert!(found_names(&document, "div > span").is_empty());
    assert_eq!(found_names(&document, "div span"), vec!["span"]);
}

#[test]
fn test_leading_child_restricts_to_top_level() {
    let document = Document::parse("<p>top</p><div><p>nested</p></div>");
    let selector = Selector::parse("> p").unwrap();
    let matches = document.find_selector(&selector);
    assert_eq!(matches.len(), 1);
    assert_eq!(document.text_of(matches[0]), vec!["top".to_string()]);
}

#[test]
fn test_id_and_class() {
    let document = Document::parse(
        r#"<div id="main" class="wrap outer"><p class="note">x</p></div>"#,
    );
    assert_eq!(found_names(&document, "#main"), vec!["div"]);
    assert_eq!(found_names(&document, ".outer"), vec!["div"]);
    assert_eq!(found_names(&document, "div .note"), vec!["p"]);
    assert_eq!(found_names(&document, "p.note"), vec!["p"]);
    assert!(found_names(&document, ".missing").is_empty());
}

#[test]
fn test_universal_matches_everything() {
    let document = Document::parse("<div><p>x</p></div>");
    assert_eq!(found_names(&document, "*"), vec!["div", "p"]);
}

#[test]
fn test_attribute_comparisons() {
    let document = Document::parse(concat!(
        r#"<a href="https://example.com/logo.png">1</a>"#,
        r#"<a href="http://example.org/page.html">2</a>"#,
        "<input disabled>",
    ));
    assert_eq!(found_names(&document, r#"[href^="https"]"#), vec!["a"]);
    assert_eq!(found_names(&document, r#"[href$=".png"]"#), vec!["a"]);
    assert_eq!(
        found_names(&document, r#"[href*="example"]"#),
        vec!["a", "a"]
    );
    assert_eq!(
        found_names(&document, r#"[href="http://example.org/page.html"]"#),
        vec!["a"]
    );
    // Existence matches a value-less boolean attribute too.
    assert_eq!(found_names(&document, "[disabled]"), vec!["input"]);
}

#[test]
fn test_first_and_last_child_ignore_non_elements() {
    let document = Document::parse(
        "<div>lead<p>one</p><!-- c --><p>two</p><p>three</p>tail</div>",
    );
    let selector = Selector::parse("p:first-child").unwrap();
    let first = document.find_selector(&selector);
    assert_eq!(first.len(), 1);
    assert_eq!(document.text_of(first[0]), vec!["one".to_string()]);

    let selector = Selector::parse("p:last-child").unwrap();
    let last = document.find_selector(&selector);
    assert_eq!(last.len(), 1);
    assert_eq!(document.text_of(last[0]), vec!["three".to_string()]);
}

#[test]
fn test_duplicate_matches_not_deduplicated() {
    // Two delegation paths reach the same span: via the outer div and via
    // the inner div during the full-selector descent.
    let document = Document::parse("<div><div><span>x</span></div></div>");
    let selector = Selector::parse("div span").unwrap();
    let matches = document.find_selector(&selector);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0], matches[1]);
}

#[test]
fn test_find_from_subtree() {
    let document = Document::parse("<div><span>in</span></div><span>out</span>");
    let div = document.find("div").unwrap()[0];
    let selector = Selector::parse("span").unwrap();
    let matches = document.find_from(div, &selector);
    assert_eq!(matches.len(), 1);
    assert_eq!(document.text_of(matches[0]), vec!["in".to_string()]);
}
