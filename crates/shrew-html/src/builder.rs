//! The tree builder: a token stream to a document tree.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! Not a spec-compliant insertion-mode machine: the builder is a
//! two-level recursive automaton with one token of lookahead and a
//! single-step rewind, which is enough to reconstruct proper nesting
//! under HTML's implicit-close rules. Each element level reads tokens
//! until it meets one it cannot handle, rewinds exactly one slot, and
//! returns — the enclosing level then re-reads the same token and decides
//! for itself. A close tag thus bubbles up through every unclosed level
//! until it finds the element it names.
//!
//! Building never fails; malformed markup always produces some tree.

use shrew_common::warning::warn_once;
use shrew_dom::{ElementData, NodeId, NodeKind, Tree};

use crate::config::HtmlConfig;
use crate::entities;
use crate::token::{Token, TokenCursor, TokenKind};

/// Build a document tree from a token stream.
///
/// The cursor is created here and owned for the whole build; callers
/// never share one across parses.
#[must_use]
pub fn build(tokens: &[Token], config: &HtmlConfig) -> Tree {
    let mut tree = Tree::new();
    let mut cursor = TokenCursor::new(tokens);
    parse_document(&mut tree, config, &mut cursor);
    tree
}

/// Top-level dispatch against the document container.
///
/// Same shape as [`parse_children`] with one difference: the rewind
/// protocol needs a floor, so a close tag nothing below claimed is
/// consumed and discarded here instead of rewound forever.
fn parse_document(tree: &mut Tree, config: &HtmlConfig, cursor: &mut TokenCursor<'_>) {
    loop {
        let Some(token) = cursor.current() else {
            return;
        };
        match token.kind {
            TokenKind::Doctype => append_leaf(tree, NodeId::ROOT, NodeKind::Doctype(token.value.clone())),
            TokenKind::Comment => append_leaf(tree, NodeId::ROOT, NodeKind::Comment(token.value.clone())),
            TokenKind::Cdata => append_leaf(tree, NodeId::ROOT, NodeKind::CData(token.value.clone())),
            TokenKind::Text => append_leaf(tree, NodeId::ROOT, NodeKind::Text(token.value.clone())),
            TokenKind::TagOpenStart => {
                let name = open_tag_name(&token.value);
                let child = tree.alloc(NodeKind::Element(ElementData::new(name)));
                tree.append_child(NodeId::ROOT, child);
                parse_element(tree, config, cursor, child);
            }
            TokenKind::TagClose => {
                warn_once(&format!("discarding unmatched close tag {}", token.value));
            }
            // Attribute fragments outside any tag carry nothing.
            _ => {}
        }
        if cursor.advance().is_none() {
            return;
        }
    }
}

/// Parse one element, entered with the cursor ON its open-tag token.
///
/// The single-token automaton: attribute tokens fill the element, the
/// tag terminator decides between children and a singleton marker, and a
/// close tag is matched against this element's own name. After
/// [`parse_children`] returns, the loop CONTINUES — the next token is the
/// element's own close tag, or a rewound token some deeper level refused,
/// which this level now evaluates against itself.
fn parse_element(
    tree: &mut Tree,
    config: &HtmlConfig,
    cursor: &mut TokenCursor<'_>,
    node: NodeId,
) {
    let name = tree
        .as_element(node)
        .map(|e| e.name.clone())
        .unwrap_or_default();
    let mut pending: Option<String> = None;

    while let Some(token) = cursor.advance() {
        match token.kind {
            TokenKind::AttributeName => {
                // A name with no value yet is a boolean attribute.
                if let Some(key) = pending.take() {
                    set_attribute(tree, node, key, None);
                }
                pending = Some(token.value.clone());
            }
            TokenKind::AttributeValue => {
                if let Some(key) = pending.take() {
                    let value = strip_attribute_value(&token.value);
                    set_attribute(tree, node, key, Some(entities::decode(value)));
                }
            }
            TokenKind::TagOpenEnd => {
                if config.elements.is_singleton(&name) {
                    if let Some(element) = tree.as_element_mut(node) {
                        element.singleton = Some(token.value.clone());
                    }
                    break;
                }
                let _ = cursor.advance();
                parse_children(tree, config, cursor, node);
                // Fall through to the next loop iteration: the close tag
                // (or whatever the children rewound) is evaluated here.
            }
            TokenKind::TagSelfClose => {
                if let Some(element) = tree.as_element_mut(node) {
                    element.singleton = Some(token.value.clone());
                }
                break;
            }
            TokenKind::TagOpenStart => {
                // A new tag began before this one was terminated: this
                // element was never properly closed. Hand the token back.
                if let Some(element) = tree.as_element_mut(node) {
                    element.explicit_close = false;
                }
                cursor.rewind();
                break;
            }
            TokenKind::TagClose => {
                let close = close_tag_name(&token.value);
                if close.eq_ignore_ascii_case(&name) {
                    // Our own close tag; consume it and stop normally.
                    break;
                }
                // Someone else's close tag. An optional-close element just
                // ends here; either way the enclosing levels each get to
                // re-evaluate the same token until one of them claims it.
                if config.elements.is_close_optional(&name)
                    && let Some(element) = tree.as_element_mut(node)
                {
                    element.explicit_close = false;
                }
                cursor.rewind();
                break;
            }
            // Character data cannot occur between `<name` and `>`.
            _ => {}
        }
    }

    if let Some(key) = pending.take() {
        set_attribute(tree, node, key, None);
    }
}

/// Parse the children of `parent`, entered with the cursor ON the first
/// content token. Returns with the cursor ON the last token it consumed
/// (or rewound past), per the protocol described in [`parse_element`].
fn parse_children(
    tree: &mut Tree,
    config: &HtmlConfig,
    cursor: &mut TokenCursor<'_>,
    parent: NodeId,
) {
    let parent_name = tree
        .as_element(parent)
        .map(|e| e.name.clone())
        .unwrap_or_default();

    // Raw-content elements delegate to a specialized node that captures
    // tokens verbatim up to the matching close tag.
    if config.elements.is_raw(&parent_name) {
        parse_raw_content(tree, cursor, parent);
        return;
    }

    loop {
        let Some(token) = cursor.current() else {
            return;
        };
        match token.kind {
            TokenKind::Doctype => append_leaf(tree, parent, NodeKind::Doctype(token.value.clone())),
            TokenKind::Comment => append_leaf(tree, parent, NodeKind::Comment(token.value.clone())),
            TokenKind::Cdata => append_leaf(tree, parent, NodeKind::CData(token.value.clone())),
            TokenKind::Text => append_leaf(tree, parent, NodeKind::Text(token.value.clone())),
            TokenKind::TagOpenStart => {
                let name = open_tag_name(&token.value);
                // `<li><li>` — a repeated optional-close element closes
                // the previous one implicitly. Hand the token back so the
                // grandparent opens the sibling.
                if name.eq_ignore_ascii_case(&parent_name)
                    && config.elements.is_close_optional(&name)
                {
                    cursor.rewind();
                    return;
                }
                let child = tree.alloc(NodeKind::Element(ElementData::new(name)));
                tree.append_child(parent, child);
                parse_element(tree, config, cursor, child);
            }
            TokenKind::TagClose => {
                // Let the parent level decide whether this closes it.
                cursor.rewind();
                return;
            }
            // Attribute fragments between children carry nothing.
            _ => {}
        }
        if cursor.advance().is_none() {
            return;
        }
    }
}

/// [§ 13.1.2 Raw text elements](https://html.spec.whatwg.org/multipage/syntax.html#raw-text-elements)
///
/// Capture the verbatim body of a raw-content element as a single
/// [`NodeKind::Raw`] child, stopping at (and handing back) the close tag.
fn parse_raw_content(tree: &mut Tree, cursor: &mut TokenCursor<'_>, parent: NodeId) {
    let mut content = String::new();
    loop {
        let Some(token) = cursor.current() else {
            break;
        };
        match token.kind {
            TokenKind::TagClose => {
                cursor.rewind();
                break;
            }
            // Verbatim capture: whatever the scanner produced is body text.
            _ => content.push_str(&token.value),
        }
        if cursor.advance().is_none() {
            break;
        }
    }
    if !content.is_empty() {
        append_leaf(tree, parent, NodeKind::Raw(content));
    }
}

fn append_leaf(tree: &mut Tree, parent: NodeId, kind: NodeKind) {
    let child = tree.alloc(kind);
    tree.append_child(parent, child);
}

fn set_attribute(tree: &mut Tree, node: NodeId, key: String, value: Option<String>) {
    if let Some(element) = tree.as_element_mut(node) {
        element.attributes.set(key, value);
    }
}

/// The tag name from a `<name` token.
fn open_tag_name(value: &str) -> String {
    value.trim_start_matches('<').to_string()
}

/// The tag name from a `</name>` token.
fn close_tag_name(value: &str) -> &str {
    value.trim_matches(|c: char| matches!(c, '<' | '/' | '>') || c.is_ascii_whitespace())
}

/// Strip the `=`, surrounding whitespace and one matching quote pair from
/// a raw attribute-value token.
fn strip_attribute_value(raw: &str) -> &str {
    let trimmed = raw.trim_matches(|c: char| c == '=' || c.is_ascii_whitespace());
    let bytes = trimmed.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}
