//! Build a [`DomTree`] from HTML text.
//!
//! Parsing is delegated to `html5ever`, which recovers from malformed input the
//! way browsers do, so importing never fails. The parser's reference-counted
//! tree is then copied into the arena:
//!
//! - elements keep their tag and attributes (names lower-cased by the parser),
//! - text is kept unless it is whitespace only,
//! - comments, doctypes and processing instructions are dropped.

use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, Namespace, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use sprig_common::warning::warn_once;
use sprig_dom::{DomTree, NodeId, NodeType};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Parse a complete document. The result always has the `html`, `head` and
/// `body` elements the HTML parser synthesizes.
#[must_use]
pub fn parse_html(html: &str) -> DomTree {
    let dom = html5ever::parse_document(RcDom::default(), ParseOpts::default()).one(html);
    let mut tree = DomTree::new();
    copy_children(&dom.document, &mut tree, NodeId::ROOT);
    tree
}

/// Parse a fragment as if it were the content of a `<body>`. The fragment's
/// top-level nodes become direct children of the Document.
#[must_use]
pub fn parse_fragment(html: &str) -> DomTree {
    let context = QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from("body"),
    );
    let dom = html5ever::parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
        .one(html);

    let mut tree = DomTree::new();
    // The fragment parser wraps its output in a single `html` element.
    let wrapper = dom.document.children.borrow().first().cloned();
    match wrapper {
        Some(wrapper) => copy_children(&wrapper, &mut tree, NodeId::ROOT),
        None => copy_children(&dom.document, &mut tree, NodeId::ROOT),
    }
    tree
}

fn copy_children(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    for child in handle.children.borrow().iter() {
        copy_node(child, tree, parent);
    }
}

fn copy_node(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    match &handle.data {
        NodeData::Document => copy_children(handle, tree, parent),
        NodeData::Element {
            name,
            attrs,
            template_contents,
            ..
        } => {
            let attrs = attrs.borrow();
            let pairs: Vec<(&str, &str)> = attrs
                .iter()
                .map(|attr| (&*attr.name.local, &*attr.value))
                .collect();
            let id = tree.create_child(parent, &name.local, None, &pairs);
            copy_children(handle, tree, id);
            // <template> content lives in its own fragment.
            if let Some(contents) = template_contents.borrow().as_ref() {
                copy_children(contents, tree, id);
            }
        }
        NodeData::Text { contents } => {
            let text = contents.borrow();
            if !text.trim().is_empty() {
                let id = tree.alloc(NodeType::Text(text.to_string()));
                tree.append_child(parent, id);
            }
        }
        NodeData::Comment { .. } => warn_once("Import", "HTML comments are dropped"),
        NodeData::Doctype { .. } => warn_once("Import", "doctype declarations are dropped"),
        NodeData::ProcessingInstruction { .. } => {
            warn_once("Import", "processing instructions are dropped");
        }
    }
}
