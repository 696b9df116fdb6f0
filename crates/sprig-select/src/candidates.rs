//! Search space for the next segment, relative to the current context node.
//!
//! Only element nodes are ever candidates. Every list is in tree order and the
//! tree is never touched mutably.

use sprig_dom::{DomTree, NodeId};

use crate::segment::Combinator;

/// Nodes the next segment may match, given where the previous one matched.
///
/// Sibling combinators are evaluated against `context` itself, never against
/// some fixed node such as the first child of the query root. A context
/// without a parent (the Document) has no siblings.
#[must_use]
pub fn candidates(tree: &DomTree, context: NodeId, combinator: Combinator) -> Vec<NodeId> {
    match combinator {
        // [§ 16.1](https://www.w3.org/TR/selectors-4/#descendant-combinators)
        // Pre-order: a node is emitted when visited, then its children follow.
        Combinator::Descendant => tree
            .descendants(context)
            .filter(|&id| tree.as_element(id).is_some())
            .collect(),

        // [§ 16.2](https://www.w3.org/TR/selectors-4/#child-combinators)
        Combinator::Child => tree.element_children(context).collect(),

        // [§ 16.3](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
        Combinator::Adjacent => {
            if tree.parent(context).is_none() {
                return Vec::new();
            }
            tree.next_element_sibling(context).into_iter().collect()
        }

        // [§ 16.4](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
        Combinator::Sibling => {
            if tree.parent(context).is_none() {
                return Vec::new();
            }
            tree.following_siblings(context)
                .filter(|&id| tree.as_element(id).is_some())
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ul > [li, "text", li, li]
    fn list() -> (DomTree, NodeId, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let mut root = tree.builder(NodeId::ROOT);
        let mut ul = root.child("ul");
        let a = ul.child("li").id();
        let _ = ul.text("gap");
        let b = ul.child("li").id();
        let c = ul.child("li").id();
        let ul_id = ul.id();
        (tree, ul_id, vec![a, b, c])
    }

    #[test]
    fn test_adjacent_is_relative_to_context() {
        let (tree, _, li) = list();
        assert_eq!(candidates(&tree, li[0], Combinator::Adjacent), vec![li[1]]);
        assert_eq!(candidates(&tree, li[1], Combinator::Adjacent), vec![li[2]]);
        assert!(candidates(&tree, li[2], Combinator::Adjacent).is_empty());
    }

    #[test]
    fn test_sibling_lists_every_later_element() {
        let (tree, _, li) = list();
        assert_eq!(
            candidates(&tree, li[0], Combinator::Sibling),
            vec![li[1], li[2]]
        );
        assert!(candidates(&tree, li[2], Combinator::Sibling).is_empty());
    }

    #[test]
    fn test_root_has_no_siblings() {
        let (tree, ul, _) = list();
        assert!(candidates(&tree, NodeId::ROOT, Combinator::Adjacent).is_empty());
        assert!(candidates(&tree, NodeId::ROOT, Combinator::Sibling).is_empty());
        assert_eq!(
            candidates(&tree, NodeId::ROOT, Combinator::Child),
            vec![ul]
        );
    }

    #[test]
    fn test_descendants_skip_text() {
        let (tree, ul, li) = list();
        let mut expected = vec![ul];
        expected.extend(li);
        assert_eq!(
            candidates(&tree, NodeId::ROOT, Combinator::Descendant),
            expected
        );
    }
}
