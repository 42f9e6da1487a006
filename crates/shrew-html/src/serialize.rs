//! The serializer: a document tree back to markup text.
//!
//! [§ 13.1 Writing HTML documents](https://html.spec.whatwg.org/multipage/syntax.html#writing)
//!
//! Elements re-emit their attributes in stored order with the configured
//! quoting; leaf nodes re-emit their stored text verbatim, so an
//! untouched tree reproduces its source structure.

use serde::{Deserialize, Serialize};
use shrew_dom::{NodeId, NodeKind, Tree};

use crate::entities;

/// [§ 13.1.2.3 Attributes](https://html.spec.whatwg.org/multipage/syntax.html#attributes-2)
///
/// How attribute values are quoted on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// "Double-quoted attribute value syntax" — the default.
    #[default]
    Double,
    /// "Single-quoted attribute value syntax".
    Single,
    /// "Unquoted attribute value syntax" where legal, falling back to
    /// double quotes for empty values and values containing characters
    /// the unquoted syntax forbids.
    Minimal,
}

/// Serialization options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SerializeOptions {
    /// Attribute quoting style.
    pub quote_style: QuoteStyle,
    /// XML mode: value-less attributes are written as `key=""`.
    pub xml: bool,
    /// Write end tags even where the element says they may be omitted.
    pub close_tags: bool,
    /// Replace stored singleton markers with this text (e.g. `"/>"` for
    /// XML output) instead of re-emitting them as written.
    pub singleton_close: Option<String>,
}

/// [§ 13.1.2.3 Attributes](https://html.spec.whatwg.org/multipage/syntax.html#unquoted)
///
/// "The attribute value... must not contain any literal space characters,
/// any U+0022, U+0027, U+003D, U+003C, U+003E, or U+0060 characters" —
/// plus the whitespace and slash characters that would end the tag.
const UNQUOTABLE: &[char] = &[
    ' ', '=', '"', '\'', '`', '<', '>', '\n', '\r', '\t', '/',
];

/// Serialize the whole document.
#[must_use]
pub fn serialize(tree: &Tree, options: &SerializeOptions) -> String {
    serialize_node(tree, NodeId::ROOT, options)
}

/// Serialize one node (and its subtree).
#[must_use]
pub fn serialize_node(tree: &Tree, node: NodeId, options: &SerializeOptions) -> String {
    let mut out = String::new();
    write_node(tree, node, options, &mut out);
    out
}

fn write_node(tree: &Tree, node: NodeId, options: &SerializeOptions, out: &mut String) {
    match tree.get(node).map(|n| &n.kind) {
        Some(NodeKind::Document) => {
            for &child in tree.children(node) {
                write_node(tree, child, options, out);
            }
        }
        Some(NodeKind::Element(_)) => write_element(tree, node, options, out),
        // Leaf kinds re-emit their stored text byte for byte.
        Some(
            NodeKind::Text(content)
            | NodeKind::Raw(content)
            | NodeKind::Comment(content)
            | NodeKind::CData(content)
            | NodeKind::Doctype(content),
        ) => out.push_str(content),
        None => {}
    }
}

fn write_element(tree: &Tree, node: NodeId, options: &SerializeOptions, out: &mut String) {
    let Some(element) = tree.as_element(node) else {
        return;
    };

    out.push('<');
    out.push_str(&element.name);

    for (key, value) in element.attributes.iter() {
        out.push(' ');
        out.push_str(key);
        // A boolean attribute is just its name, unless XML mode forces a
        // value to be written.
        if value.is_none() && !options.xml {
            continue;
        }
        let value = value.unwrap_or("");
        let quote = pick_quote(value, options.quote_style);
        out.push('=');
        if let Some(q) = quote {
            out.push(q);
        }
        if !value.is_empty() {
            out.push_str(&entities::escape_attribute(value, quote));
        }
        if let Some(q) = quote {
            out.push(q);
        }
    }

    if let Some(marker) = &element.singleton {
        // Void and self-closed elements re-emit their stored marker (or
        // the configured override) and have no content.
        out.push_str(options.singleton_close.as_deref().unwrap_or(marker));
        return;
    }

    out.push('>');
    for &child in tree.children(node) {
        write_node(tree, child, options, out);
    }
    if options.close_tags || element.explicit_close {
        out.push_str("</");
        out.push_str(&element.name);
        out.push('>');
    }
}

/// Choose the quote character for a value, `None` to omit quotes.
fn pick_quote(value: &str, style: QuoteStyle) -> Option<char> {
    match style {
        QuoteStyle::Single => Some('\''),
        QuoteStyle::Minimal if !value.is_empty() && !value.contains(UNQUOTABLE) => None,
        QuoteStyle::Minimal | QuoteStyle::Double => Some('"'),
    }
}
