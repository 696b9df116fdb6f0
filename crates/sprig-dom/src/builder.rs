use crate::{DomTree, NodeId, NodeType};

/// A cursor over one node of a [`DomTree`] that appends to it.
///
/// Every element is minted through [`DomTree::create_child`]; the builder only
/// threads the tree borrow and the current position.
///
/// ```
/// use sprig_dom::{DomTree, NodeId};
///
/// let mut tree = DomTree::new();
/// let mut root = tree.builder(NodeId::ROOT);
/// let mut ul = root.child("ul");
/// let _ = ul.child("li").text("one");
/// let _ = ul.child_with("li", Some("two"), &[("class", "x")]);
/// let ul_id = ul.id();
///
/// assert_eq!(tree.element_children(ul_id).count(), 2);
/// ```
pub struct NodeBuilder<'tree> {
    tree: &'tree mut DomTree,
    id: NodeId,
}

impl<'tree> NodeBuilder<'tree> {
    /// Position a builder at `id`.
    pub const fn new(tree: &'tree mut DomTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The node this builder appends to.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Read access to the tree being built.
    #[must_use]
    pub fn tree(&self) -> &DomTree {
        self.tree
    }

    /// Append an empty `<tag>` element and return a builder for it.
    pub fn child(&mut self, tag: &str) -> NodeBuilder<'_> {
        self.child_with(tag, None, &[])
    }

    /// Append `<tag>` with an optional text payload and attributes, returning
    /// a builder for it.
    pub fn child_with(
        &mut self,
        tag: &str,
        text: Option<&str>,
        attrs: &[(&str, &str)],
    ) -> NodeBuilder<'_> {
        let id = self.tree.create_child(self.id, tag, text, attrs);
        NodeBuilder::new(self.tree, id)
    }

    /// Consume this builder and return one for a new `<tag>` child, keeping the
    /// full tree borrow. Useful for building a chain of single children.
    #[must_use]
    pub fn into_child(self, tag: &str) -> Self {
        let id = self.tree.create_child(self.id, tag, None, &[]);
        Self::new(self.tree, id)
    }

    /// Set an attribute from a markup value. Ignored on non-element nodes.
    pub fn attr(&mut self, name: &str, value: &str) -> &mut Self {
        if let Some(element) = self.tree.as_element_mut(self.id) {
            element.attrs.set(name, value);
        }
        self
    }

    /// Set an attribute to an explicit list of values. Ignored on non-element nodes.
    pub fn attr_values(&mut self, name: &str, values: &[&str]) -> &mut Self {
        if let Some(element) = self.tree.as_element_mut(self.id) {
            element.attrs.set_values(name, values.iter().copied());
        }
        self
    }

    /// Replace the element's text payload.
    pub fn set_text(&mut self, text: &str) -> &mut Self {
        if let Some(element) = self.tree.as_element_mut(self.id) {
            element.text = Some(text.to_string());
        }
        self
    }

    /// Append a text node.
    pub fn text(&mut self, text: &str) -> &mut Self {
        let id = self.tree.alloc(NodeType::Text(text.to_string()));
        self.tree.append_child(self.id, id);
        self
    }

    /// Append a raw markup node, rendered verbatim.
    pub fn raw(&mut self, markup: &str) -> &mut Self {
        let id = self.tree.alloc(NodeType::Raw(markup.to_string()));
        self.tree.append_child(self.id, id);
        self
    }
}
