//! Tests for tree structure, traversal, and attribute normalisation.

use sprig_dom::{Attributes, DomTree, ElementData, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(tag)))
}

// ========== append_child / siblings ==========

#[test]
fn test_append_child_links_siblings() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.parent(b), Some(parent));
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(c), Some(b));
    assert_eq!(tree.next_sibling(c), None);
}

#[test]
fn test_append_child_ignores_unknown_ids() {
    let mut tree = DomTree::new();
    tree.append_child(NodeId::ROOT, NodeId(42));
    assert!(tree.children(NodeId::ROOT).is_empty());
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_append_child_moves_attached_node() {
    let mut tree = DomTree::new();
    let left = alloc_element(&mut tree, "ul");
    let right = alloc_element(&mut tree, "ol");
    tree.append_child(NodeId::ROOT, left);
    tree.append_child(NodeId::ROOT, right);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    let z = alloc_element(&mut tree, "z");
    tree.append_child(left, a);
    tree.append_child(left, b);
    tree.append_child(left, c);
    tree.append_child(right, z);

    tree.append_child(right, b);

    assert_eq!(tree.children(left), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
    assert_eq!(tree.children(right), &[z, b]);
    assert_eq!(tree.parent(b), Some(right));
    assert_eq!(tree.prev_sibling(b), Some(z));
    assert_eq!(tree.next_sibling(b), None);

    // re-appending to the same parent moves it to the end
    tree.append_child(left, a);
    assert_eq!(tree.children(left), &[c, a]);
    assert_eq!(tree.prev_sibling(c), None);
    assert_eq!(tree.next_sibling(c), Some(a));
}

#[test]
fn test_append_child_refuses_cycles() {
    let mut tree = DomTree::new();
    let outer = alloc_element(&mut tree, "div");
    let inner = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, outer);
    tree.append_child(outer, inner);

    tree.append_child(inner, inner);
    tree.append_child(inner, outer);
    tree.append_child(inner, NodeId::ROOT);

    assert_eq!(tree.parent(outer), Some(NodeId::ROOT));
    assert_eq!(tree.children(inner), &[] as &[NodeId]);
    assert_eq!(tree.descendants(NodeId::ROOT).count(), 2);
}

#[test]
fn test_element_siblings_skip_text() {
    let mut tree = DomTree::new();
    let mut root = tree.builder(NodeId::ROOT);
    let mut p = root.child("p");
    let first = p.child("b").id();
    let _ = p.text("between");
    let second = p.child("i").id();
    let _ = p.raw("<!-- raw -->");
    let p_id = p.id();

    assert_eq!(tree.children(p_id).len(), 4);
    assert_eq!(tree.element_children(p_id).collect::<Vec<_>>(), vec![first, second]);
    assert_eq!(tree.next_element_sibling(first), Some(second));
    assert_eq!(tree.next_element_sibling(second), None);
}

#[test]
fn test_following_and_preceding_siblings() {
    let mut tree = DomTree::new();
    let ul = tree.create_child(NodeId::ROOT, "ul", None, &[]);
    let items: Vec<NodeId> = (0..4)
        .map(|_| tree.create_child(ul, "li", None, &[]))
        .collect();

    assert_eq!(
        tree.following_siblings(items[1]).collect::<Vec<_>>(),
        vec![items[2], items[3]]
    );
    assert_eq!(
        tree.preceding_siblings(items[2]).collect::<Vec<_>>(),
        vec![items[1], items[0]]
    );
    assert_eq!(tree.following_siblings(items[3]).count(), 0);
}

// ========== traversal ==========

#[test]
fn test_descendants_pre_order() {
    // div > [p > [span], ul > [li, li]]
    let mut tree = DomTree::new();
    let div = tree.create_child(NodeId::ROOT, "div", None, &[]);
    let p = tree.create_child(div, "p", None, &[]);
    let span = tree.create_child(p, "span", None, &[]);
    let ul = tree.create_child(div, "ul", None, &[]);
    let li1 = tree.create_child(ul, "li", None, &[]);
    let li2 = tree.create_child(ul, "li", None, &[]);

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![div, p, span, ul, li1, li2]);

    let under_div: Vec<NodeId> = tree.descendants(div).collect();
    assert_eq!(under_div, vec![p, span, ul, li1, li2]);

    assert_eq!(tree.descendants(span).count(), 0);
}

#[test]
fn test_ancestors_and_is_descendant_of() {
    let mut tree = DomTree::new();
    let html = tree.create_child(NodeId::ROOT, "html", None, &[]);
    let body = tree.create_child(html, "body", None, &[]);
    let p = tree.create_child(body, "p", None, &[]);

    assert_eq!(
        tree.ancestors(p).collect::<Vec<_>>(),
        vec![body, html, NodeId::ROOT]
    );
    assert!(tree.is_descendant_of(p, html));
    assert!(!tree.is_descendant_of(html, p));
    assert!(!tree.is_descendant_of(p, p));
}

#[test]
fn test_text_content_collects_payloads() {
    let mut tree = DomTree::new();
    let mut root = tree.builder(NodeId::ROOT);
    let mut p = root.child_with("p", Some("Hello, "), &[]);
    let _ = p.child_with("b", Some("world"), &[]);
    let _ = p.text("!");
    let _ = p.raw("<br>");
    let p_id = p.id();

    assert_eq!(tree.text_content(p_id), "Hello, world!");
}

// ========== normalisation ==========

#[test]
fn test_tag_and_attribute_names_are_lowercased() {
    let mut tree = DomTree::new();
    let id = tree.create_child(NodeId::ROOT, "DIV", None, &[("Data-X", "Value")]);

    assert_eq!(tree.tag(id), Some("div"));
    let attrs = tree.attributes(id).expect("element has attributes");
    assert_eq!(attrs.get("data-x"), Some(&["Value".to_string()][..]));
    assert!(attrs.get("Data-X").is_none());
}

#[test]
fn test_class_is_split_into_tokens() {
    let mut attrs = Attributes::default();
    attrs.set("class", "  a b\tc ");
    assert_eq!(
        attrs.get("class"),
        Some(&["a".to_string(), "b".to_string(), "c".to_string()][..])
    );
}

#[test]
fn test_plain_attribute_keeps_whitespace() {
    let mut attrs = Attributes::default();
    attrs.set("title", "Hello world");
    assert_eq!(attrs.get("title"), Some(&["Hello world".to_string()][..]));
}

#[test]
fn test_empty_value_is_one_empty_string() {
    let mut attrs = Attributes::default();
    attrs.set("class", "");
    attrs.set("disabled", "");
    attrs.set_values::<[&str; 0], &str>("data-list", []);

    assert_eq!(attrs.get("class"), Some(&[String::new()][..]));
    assert_eq!(attrs.get("disabled"), Some(&[String::new()][..]));
    assert_eq!(attrs.get("data-list"), Some(&[String::new()][..]));
}

#[test]
fn test_set_replaces_and_keeps_order() {
    let mut attrs = Attributes::default();
    attrs.set("id", "one");
    attrs.set("class", "x");
    attrs.set("id", "two");

    let names: Vec<&str> = attrs.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["id", "class"]);
    assert_eq!(attrs.get("id"), Some(&["two".to_string()][..]));

    assert_eq!(attrs.remove("id"), Some(vec!["two".to_string()]));
    assert!(!attrs.contains("id"));
    assert_eq!(attrs.len(), 1);
}

#[test]
fn test_element_data_accessors() {
    let mut data = ElementData::new("li");
    assert!(data.id().is_none());
    assert!(data.classes().is_empty());

    data.attrs.set("id", "first");
    data.attrs.set("class", "x y");
    assert_eq!(data.id(), Some(&["first".to_string()][..]));
    assert_eq!(data.classes(), &["x".to_string(), "y".to_string()]);
}
