//! The document facade: owns the tree and the shared configuration.

use std::sync::Arc;

use shrew_dom::{NodeId, NodeKind, Tree};
use shrew_select::{Selector, SelectorError};

use crate::config::{HtmlConfig, MinifyOptions};
use crate::serialize::SerializeOptions;
use crate::token::Token;
use crate::{builder, entities, minify, serialize, tokenizer};

/// A parsed HTML document.
///
/// Owns the arena [`Tree`] and a shared immutable [`HtmlConfig`]; every
/// operation of the toolkit — minify, query, extract, serialize — hangs
/// off this type. Mutation (minify) and reads are not synchronized; the
/// design assumes single-writer, read-after-write usage.
#[derive(Debug, Clone)]
pub struct Document {
    tree: Tree,
    config: Arc<HtmlConfig>,
}

impl Document {
    /// Parse markup with the default HTML5 configuration.
    ///
    /// Parsing never fails: malformed markup is repaired by the builder's
    /// recovery rules and always yields some tree.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self::parse_with_config(html, Arc::new(HtmlConfig::default()))
    }

    /// Parse markup with a caller-supplied configuration.
    #[must_use]
    pub fn parse_with_config(html: &str, config: Arc<HtmlConfig>) -> Self {
        let tokens = tokenizer::tokenize(html, &config);
        Self::from_tokens(&tokens, config)
    }

    /// Build a document from an already-tokenized stream.
    #[must_use]
    pub fn from_tokens(tokens: &[Token], config: Arc<HtmlConfig>) -> Self {
        let tree = builder::build(tokens, &config);
        Self { tree, config }
    }

    /// The underlying tree, for direct traversal.
    #[must_use]
    pub const fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The configuration this document was parsed with.
    #[must_use]
    pub fn config(&self) -> &HtmlConfig {
        &self.config
    }

    /// Apply minification in place. Idempotent for a given set of options.
    pub fn minify(&mut self, options: &MinifyOptions) {
        let config = Arc::clone(&self.config);
        minify(&mut self.tree, &config, options);
    }

    /// Query the document with a selector string.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] when the selector string itself is
    /// invalid. A valid selector that matches nothing returns an empty
    /// list — "not found" is never an error.
    pub fn find(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.find_selector(&selector))
    }

    /// Query the document with an already-parsed selector.
    ///
    /// Matches are accumulated across the top-level elements in
    /// pre-order; duplicates are possible and are not removed.
    #[must_use]
    pub fn find_selector(&self, selector: &Selector) -> Vec<NodeId> {
        let mut found = Vec::new();
        for element in self.tree.child_elements(NodeId::ROOT) {
            found.extend(shrew_select::find(&self.tree, element, selector));
        }
        found
    }

    /// Query the subtree rooted at `node`.
    #[must_use]
    pub fn find_from(&self, node: NodeId, selector: &Selector) -> Vec<NodeId> {
        shrew_select::find(&self.tree, node, selector)
    }

    /// The document's text content as ordered, entity-decoded fragments.
    #[must_use]
    pub fn text(&self) -> Vec<String> {
        self.text_of(NodeId::ROOT)
    }

    /// The text content under one node, ordered and entity-decoded.
    #[must_use]
    pub fn text_of(&self, node: NodeId) -> Vec<String> {
        self.tree
            .text_contents(node)
            .iter()
            .map(|fragment| entities::decode(fragment))
            .collect()
    }

    /// Serialize the whole document back to markup.
    #[must_use]
    pub fn serialize(&self, options: &SerializeOptions) -> String {
        serialize(&self.tree, options)
    }

    /// Serialize one node (and its subtree) back to markup.
    #[must_use]
    pub fn serialize_node(&self, node: NodeId, options: &SerializeOptions) -> String {
        serialize::serialize_node(&self.tree, node, options)
    }

    /// Look up an attribute on an element node.
    ///
    /// The outer `Option` is `None` for a missing key (or a non-element
    /// node); the inner one distinguishes a value from a boolean
    /// attribute. A missing key is an absence, never an error.
    #[must_use]
    pub fn attribute(&self, node: NodeId, key: &str) -> Option<Option<&str>> {
        self.tree
            .as_element(node)
            .and_then(|element| element.attributes.get(key))
    }

    /// The tag name of an element node.
    #[must_use]
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.tree.as_element(node).map(|element| element.name.as_str())
    }

    /// The element children of a node in document order.
    #[must_use]
    pub fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.child_elements(node)
    }
}

/// Print a subtree to stdout for debugging, one node per line.
pub fn dump_tree(tree: &Tree, node: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    match tree.get(node).map(|n| &n.kind) {
        Some(NodeKind::Document) => println!("{indent}#document"),
        Some(NodeKind::Element(data)) => {
            let attrs: Vec<String> = data
                .attributes
                .iter()
                .map(|(k, v)| match v {
                    Some(v) => format!("{k}={v:?}"),
                    None => k.to_string(),
                })
                .collect();
            if attrs.is_empty() {
                println!("{indent}<{}>", data.name);
            } else {
                println!("{indent}<{}> {}", data.name, attrs.join(" "));
            }
        }
        Some(NodeKind::Text(content)) => println!("{indent}#text {content:?}"),
        Some(NodeKind::Raw(content)) => println!("{indent}#raw ({} bytes)", content.len()),
        Some(NodeKind::Comment(content)) => println!("{indent}{content}"),
        Some(NodeKind::CData(_)) => println!("{indent}#cdata"),
        Some(NodeKind::Doctype(content)) => println!("{indent}{content}"),
        None => {}
    }
    for &child in tree.children(node) {
        dump_tree(tree, child, depth + 1);
    }
}
