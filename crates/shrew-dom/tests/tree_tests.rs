//! Integration tests for the arena tree and the attribute list.

use shrew_dom::{AttributeList, ElementData, NodeId, NodeKind, Tree};

/// Helper to allocate an element node kind.
fn element(name: &str) -> NodeKind {
    NodeKind::Element(ElementData::new(name.to_string()))
}

#[test]
fn test_append_child_sets_parent() {
    let mut tree = Tree::new();
    let div = tree.alloc(element("div"));
    tree.append_child(NodeId::ROOT, div);
    let text = tree.alloc(NodeKind::Text("hi".to_string()));
    tree.append_child(div, text);

    assert_eq!(tree.parent(div), Some(NodeId::ROOT));
    assert_eq!(tree.parent(text), Some(div));
    assert_eq!(tree.children(div), &[text]);
}

#[test]
fn test_child_elements_skip_leaves() {
    let mut tree = Tree::new();
    let div = tree.alloc(element("div"));
    tree.append_child(NodeId::ROOT, div);
    let text = tree.alloc(NodeKind::Text("a".to_string()));
    tree.append_child(div, text);
    let span = tree.alloc(element("span"));
    tree.append_child(div, span);
    let comment = tree.alloc(NodeKind::Comment("<!--c-->".to_string()));
    tree.append_child(div, comment);
    let b = tree.alloc(element("b"));
    tree.append_child(div, b);

    assert_eq!(tree.child_elements(div), vec![span, b]);
    assert_eq!(tree.first_element_child(div), Some(span));
    assert_eq!(tree.last_element_child(div), Some(b));
}

#[test]
fn test_text_contents_skips_non_text_leaves() {
    let mut tree = Tree::new();
    let div = tree.alloc(element("div"));
    tree.append_child(NodeId::ROOT, div);
    let hello = tree.alloc(NodeKind::Text("Hello ".to_string()));
    tree.append_child(div, hello);
    let b = tree.alloc(element("b"));
    tree.append_child(div, b);
    let world = tree.alloc(NodeKind::Text("World".to_string()));
    tree.append_child(b, world);
    let comment = tree.alloc(NodeKind::Comment("<!--c-->".to_string()));
    tree.append_child(div, comment);
    let raw = tree.alloc(NodeKind::Raw("var a;".to_string()));
    tree.append_child(div, raw);

    assert_eq!(
        tree.text_contents(NodeId::ROOT),
        vec!["Hello ".to_string(), "World".to_string()]
    );
}

#[test]
fn test_attribute_order_preserved() {
    let mut attrs = AttributeList::new();
    attrs.set("href".to_string(), Some("x".to_string()));
    attrs.set("class".to_string(), Some("a".to_string()));
    attrs.set("id".to_string(), Some("b".to_string()));

    let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["href", "class", "id"]);
}

#[test]
fn test_attribute_set_replaces_in_place() {
    let mut attrs = AttributeList::new();
    attrs.set("href".to_string(), Some("x".to_string()));
    attrs.set("class".to_string(), Some("a".to_string()));
    attrs.set("href".to_string(), Some("y".to_string()));

    assert_eq!(attrs.len(), 2);
    assert_eq!(attrs.get("href"), Some(Some("y")));
    let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["href", "class"]);
}

#[test]
fn test_attribute_rename_preserves_position() {
    let mut attrs = AttributeList::new();
    attrs.set("HREF".to_string(), Some("x".to_string()));
    attrs.set("title".to_string(), Some("t".to_string()));
    attrs.rename("HREF", "href");

    let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["href", "title"]);
    assert_eq!(attrs.get("href"), Some(Some("x")));
}

#[test]
fn test_attribute_rename_collision_keeps_single_key() {
    let mut attrs = AttributeList::new();
    attrs.set("class".to_string(), Some("first".to_string()));
    attrs.set("CLASS".to_string(), Some("second".to_string()));
    attrs.rename("CLASS", "class");

    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs.get("class"), Some(Some("second")));
}

#[test]
fn test_attribute_boolean_distinct_from_absent() {
    let mut attrs = AttributeList::new();
    attrs.set("disabled".to_string(), None);

    assert_eq!(attrs.get("disabled"), Some(None));
    assert_eq!(attrs.get("checked"), None);
    assert!(attrs.contains_key("disabled"));
    assert!(!attrs.contains_key("checked"));
}

#[test]
fn test_attribute_remove() {
    let mut attrs = AttributeList::new();
    attrs.set("id".to_string(), Some("x".to_string()));
    assert!(attrs.remove("id"));
    assert!(!attrs.remove("id"));
    assert!(attrs.is_empty());
}

#[test]
fn test_singleton_element_data_defaults() {
    let data = ElementData::new("img".to_string());
    assert!(data.singleton.is_none());
    assert!(data.explicit_close);
    assert!(data.attributes.is_empty());
}

#[test]
fn test_classes_split_on_whitespace() {
    let mut data = ElementData::new("p".to_string());
    data.attributes
        .set("class".to_string(), Some("nav  item\tactive".to_string()));
    assert_eq!(data.classes(), vec!["nav", "item", "active"]);
}
