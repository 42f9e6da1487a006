//! Document tree for the shrew HTML toolkit.
//!
//! This crate provides an arena-based markup tree loosely following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), shaped for the
//! needs of a minifier rather than a browser: attributes keep their source
//! order and may be value-less, void elements remember the exact closing
//! marker they were written with, and every element records whether its
//! end tag was present in the input.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. Node 0 is a synthetic document container that owns the
//! top-level children list, so even top-level elements have a parent for
//! positional queries.

/// A type-safe index into the document tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document container node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// An insertion-ordered attribute map with unique keys and optional values.
///
/// [§ 13.1.2.3 Attributes](https://html.spec.whatwg.org/multipage/syntax.html#attributes-2)
/// "Attributes have a name and a value." Boolean attributes are stored with
/// a `None` value so "absent key" and "present, value-less" stay distinct.
///
/// Source order is preserved and is meaningful: the serializer re-emits
/// attributes exactly in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    entries: Vec<(String, Option<String>)>,
}

impl AttributeList {
    /// Create an empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no attributes are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an attribute by key.
    ///
    /// The outer `Option` distinguishes "key absent" from "key present";
    /// the inner one distinguishes a value from a boolean attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    /// True when the key is present, regardless of whether it has a value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert or replace an attribute.
    ///
    /// An existing key keeps its position and only the value changes;
    /// a new key is appended at the end, matching source order.
    pub fn set(&mut self, key: String, value: Option<String>) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Remove an attribute, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        before != self.entries.len()
    }

    /// Rename an attribute in place, preserving its position.
    ///
    /// If the new key already names another entry, that earlier entry wins
    /// the position and takes this entry's value, and the renamed entry is
    /// dropped — keys stay unique.
    pub fn rename(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }
        let Some(index) = self.entries.iter().position(|(k, _)| k == old) else {
            return;
        };
        if let Some(target) = self.entries.iter().position(|(k, _)| k == new) {
            let (_, value) = self.entries.remove(index);
            self.entries[if target > index { target - 1 } else { target }].1 = value;
        } else {
            self.entries[index].0 = new.to_string();
        }
    }

    /// Iterate attributes in stored order as `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Snapshot of the keys in stored order.
    ///
    /// Used by passes that mutate the list while walking it.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

/// Element-specific data.
///
/// Per [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)
/// an element has a tag name, attributes, and either content or one of the
/// void/self-closing forms.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The tag name, with source case until a minify pass folds it.
    pub name: String,
    /// The element's attribute list, in source order.
    pub attributes: AttributeList,
    /// The stored closing-marker text (`">"` or `"/>"`) for void or
    /// self-closed elements. `Some` implies the element owns no children.
    ///
    /// [§ 13.1.2](https://html.spec.whatwg.org/multipage/syntax.html#start-tags)
    /// "Void elements only have a start tag; end tags must not be
    /// specified for void elements."
    pub singleton: Option<String>,
    /// Whether the end tag should be written out on serialization.
    ///
    /// [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
    /// False either because the input omitted the end tag or because a
    /// minify pass decided omission is unambiguous.
    pub explicit_close: bool,
}

impl ElementData {
    /// Create element data for a freshly opened tag.
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            name,
            attributes: AttributeList::new(),
            singleton: None,
            explicit_close: true,
        }
    }

    /// Returns the element's id attribute value if present.
    ///
    /// [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes)
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").flatten()
    }

    /// Returns the space-separated class tokens of the class attribute.
    ///
    /// [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes)
    /// "The class attribute, if specified, must have a value that is a set
    /// of space-separated tokens."
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        match self.attributes.get("class").flatten() {
            Some(list) => list.split_ascii_whitespace().collect(),
            None => Vec::new(),
        }
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
///
/// The minifier keeps more leaf kinds than a browser DOM because each kind
/// serializes differently and only some participate in text extraction.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The synthetic container at [`NodeId::ROOT`] owning top-level nodes.
    Document,
    /// A markup element with attributes and (unless void) children.
    Element(ElementData),
    /// A run of character data, stored verbatim as it appeared in source.
    Text(String),
    /// The unparsed body of a raw-content element (`script`, `style`).
    ///
    /// [§ 13.1.2](https://html.spec.whatwg.org/multipage/syntax.html#raw-text-elements)
    /// "Raw text elements can have text, though it has restrictions" — the
    /// body is never parsed as markup and is re-emitted byte for byte.
    Raw(String),
    /// A comment, stored with its delimiters (`<!-- ... -->`).
    Comment(String),
    /// A CDATA section, stored with its delimiters.
    CData(String),
    /// A doctype declaration, stored verbatim.
    Doctype(String),
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "An object that participates in a tree has a parent, which is either
/// null or an object." Parent links are non-owning indices; children are
/// owned exclusively by their parent's list, so no cycles can form.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub kind: NodeKind,
    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// `None` only for the document container.
    pub parent: Option<NodeId>,
    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,
}

/// Arena-based document tree with O(1) node access.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
/// "The DOM represents a document as a tree."
///
/// All nodes live in one contiguous vector indexed by [`NodeId`]; the
/// document container sits at index 0.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a new tree holding only the document container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The document container node id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false in practice (the container node is allocated on
    /// construction); provided to pair with [`Tree::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Allocate a detached node and return its id.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Append `child` as the last child of `parent` and set its back link.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Parent of a node, `None` for the document container.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of a node in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Element data if the node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Mutable element data if the node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Text content if the node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// The element children of a node, skipping text and other leaf kinds.
    #[must_use]
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.as_element(c).is_some())
            .collect()
    }

    /// First element child, used for `:first-child` positioning.
    ///
    /// [Selectors 4 § 4.12](https://www.w3.org/TR/selectors-4/#the-first-child-pseudo)
    /// Non-element siblings are ignored for positional indexing.
    #[must_use]
    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.as_element(c).is_some())
    }

    /// Last element child, used for `:last-child` positioning.
    #[must_use]
    pub fn last_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id)
            .iter()
            .rev()
            .copied()
            .find(|&c| self.as_element(c).is_some())
    }

    /// Ordered raw text fragments under a node.
    ///
    /// Flattens the subtree depth-first, collecting the content of text
    /// nodes reachable through elements only; comments, CDATA sections,
    /// doctypes and raw-content bodies contribute nothing. Fragments are
    /// returned as stored (entity decoding is the caller's concern).
    #[must_use]
    pub fn text_contents(&self, id: NodeId) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut Vec<String>) {
        for &child in self.children(id) {
            match self.get(child).map(|n| &n.kind) {
                Some(NodeKind::Text(content)) => out.push(content.clone()),
                Some(NodeKind::Element(_) | NodeKind::Document) => {
                    self.collect_text(child, out);
                }
                _ => {}
            }
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
