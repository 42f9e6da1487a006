//! Integration tests for the serializer and round-trip behavior.

use shrew_html::{Document, QuoteStyle, SerializeOptions};

/// Helper to parse and re-serialize without minifying.
fn roundtrip(html: &str, options: &SerializeOptions) -> String {
    Document::parse(html).serialize(options)
}

#[test]
fn test_untouched_document_reproduces_source() {
    let html = concat!(
        "<!DOCTYPE html>",
        "<html><head><title>t</title></head>",
        r#"<body><p class="a">x &amp; y</p><img src="i.png"></body></html>"#
    );
    assert_eq!(roundtrip(html, &SerializeOptions::default()), html);
}

#[test]
fn test_single_quote_style() {
    let options = SerializeOptions {
        quote_style: QuoteStyle::Single,
        ..SerializeOptions::default()
    };
    assert_eq!(
        roundtrip(r#"<a href="x">y</a>"#, &options),
        "<a href='x'>y</a>"
    );
}

#[test]
fn test_minimal_quotes_omitted_when_safe() {
    let options = SerializeOptions {
        quote_style: QuoteStyle::Minimal,
        ..SerializeOptions::default()
    };
    assert_eq!(
        roundtrip(r#"<a href="page.html">y</a>"#, &options),
        "<a href=page.html>y</a>"
    );
}

#[test]
fn test_minimal_quotes_fall_back_on_space() {
    let options = SerializeOptions {
        quote_style: QuoteStyle::Minimal,
        ..SerializeOptions::default()
    };
    assert_eq!(
        roundtrip(r#"<p title="a b">y</p>"#, &options),
        r#"<p title="a b">y</p>"#
    );
}

#[test]
fn test_minimal_quotes_fall_back_on_empty() {
    let options = SerializeOptions {
        quote_style: QuoteStyle::Minimal,
        ..SerializeOptions::default()
    };
    assert_eq!(
        roundtrip(r#"<p title="">y</p>"#, &options),
        r#"<p title="">y</p>"#
    );
}

#[test]
fn test_value_escaping_uses_active_quote() {
    // The source single-quotes a value containing a double quote; output
    // double-quotes it, so the double quote must be escaped.
    let document = Document::parse(r#"<a title='a"b<c'>y</a>"#);
    assert_eq!(
        document.serialize(&SerializeOptions::default()),
        r#"<a title="a&quot;b&lt;c">y</a>"#
    );
    let single = SerializeOptions {
        quote_style: QuoteStyle::Single,
        ..SerializeOptions::default()
    };
    assert_eq!(
        document.serialize(&single),
        r#"<a title='a"b&lt;c'>y</a>"#
    );
}

#[test]
fn test_xml_mode_gives_boolean_attributes_values() {
    let options = SerializeOptions {
        xml: true,
        singleton_close: Some("/>".to_string()),
        ..SerializeOptions::default()
    };
    assert_eq!(
        roundtrip("<input disabled>", &options),
        r#"<input disabled=""/>"#
    );
}

#[test]
fn test_singleton_override_replaces_marker() {
    let options = SerializeOptions {
        singleton_close: Some(">".to_string()),
        ..SerializeOptions::default()
    };
    assert_eq!(roundtrip("<br/>", &options), "<br>");
}

#[test]
fn test_omitted_close_restored_by_close_tags() {
    let options = SerializeOptions {
        close_tags: true,
        ..SerializeOptions::default()
    };
    assert_eq!(roundtrip("<p>a<p>b", &options), "<p>a</p><p>b</p>");
}

#[test]
fn test_comment_cdata_doctype_verbatim() {
    let html = "<!DOCTYPE html><!-- note --><![CDATA[1 < 2]]><p>x</p>";
    assert_eq!(roundtrip(html, &SerializeOptions::default()), html);
}
