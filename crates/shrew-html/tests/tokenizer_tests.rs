//! Integration tests for the lexical scanner.

use shrew_html::{HtmlConfig, Token, TokenKind, tokenize};

/// Helper to tokenize with the default configuration.
fn scan(html: &str) -> Vec<Token> {
    tokenize(html, &HtmlConfig::default())
}

/// Helper to project tokens onto their kinds.
fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn test_simple_element_tokens() {
    let tokens = scan("<div>x</div>");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::TagOpenStart,
            TokenKind::TagOpenEnd,
            TokenKind::Text,
            TokenKind::TagClose,
        ]
    );
    assert_eq!(tokens[0].value, "<div");
    assert_eq!(tokens[1].value, ">");
    assert_eq!(tokens[2].value, "x");
    assert_eq!(tokens[3].value, "</div>");
}

#[test]
fn test_attribute_value_keeps_quotes_and_equals() {
    let tokens = scan(r#"<a href = "x y">"#);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::TagOpenStart,
            TokenKind::AttributeName,
            TokenKind::AttributeValue,
            TokenKind::TagOpenEnd,
        ]
    );
    assert_eq!(tokens[1].value, "href");
    assert_eq!(tokens[2].value, r#"= "x y""#);
}

#[test]
fn test_unquoted_attribute_value() {
    let tokens = scan("<img src=photo.png>");
    assert_eq!(tokens[2].value, "=photo.png");
}

#[test]
fn test_boolean_attribute_is_name_only() {
    let tokens = scan("<input disabled>");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::TagOpenStart,
            TokenKind::AttributeName,
            TokenKind::TagOpenEnd,
        ]
    );
    assert_eq!(tokens[1].value, "disabled");
}

#[test]
fn test_self_close_terminator() {
    let tokens = scan("<br/>");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::TagOpenStart, TokenKind::TagSelfClose]
    );
    assert_eq!(tokens[1].value, "/>");
}

#[test]
fn test_comment_doctype_cdata_kept_verbatim() {
    let tokens = scan("<!DOCTYPE html><!-- note --><![CDATA[x < y]]>");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Doctype, TokenKind::Comment, TokenKind::Cdata]
    );
    assert_eq!(tokens[0].value, "<!DOCTYPE html>");
    assert_eq!(tokens[1].value, "<!-- note -->");
    assert_eq!(tokens[2].value, "<![CDATA[x < y]]>");
}

#[test]
fn test_raw_content_is_one_text_token() {
    let tokens = scan("<script>if (a < b) { f(); }</script>");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::TagOpenStart,
            TokenKind::TagOpenEnd,
            TokenKind::Text,
            TokenKind::TagClose,
        ]
    );
    assert_eq!(tokens[2].value, "if (a < b) { f(); }");
    assert_eq!(tokens[3].value, "</script>");
}

#[test]
fn test_raw_close_tag_is_case_insensitive() {
    let tokens = scan("<style>a{}</STYLE>");
    assert_eq!(tokens[2].value, "a{}");
    assert_eq!(tokens[3].value, "</STYLE>");
}

#[test]
fn test_unterminated_tag_starts_fresh_at_next_tag() {
    let tokens = scan("<div <span>x</span>");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::TagOpenStart,
            TokenKind::TagOpenStart,
            TokenKind::TagOpenEnd,
            TokenKind::Text,
            TokenKind::TagClose,
        ]
    );
    assert_eq!(tokens[0].value, "<div");
    assert_eq!(tokens[1].value, "<span");
}

#[test]
fn test_stray_angle_bracket_is_text() {
    let tokens = scan("a < b");
    assert_eq!(kinds(&tokens), vec![TokenKind::Text, TokenKind::Text]);
    assert_eq!(tokens[0].value, "a ");
    assert_eq!(tokens[1].value, "< b");
}

#[test]
fn test_never_fails_on_garbage() {
    // Anything the scanner cannot place degrades to text; no panics.
    let tokens = scan("<<<>>><a <b <!->");
    assert!(!tokens.is_empty());
}
