//! Depth-first driver threading candidates and the matcher across a plan.

use std::collections::HashSet;

use sprig_dom::{DomTree, NodeId};

use crate::candidates::candidates;
use crate::matcher::matches;
use crate::segment::SelectorSegment;

/// Ordered hits of one query, deduplicated by node identity.
///
/// A node reached through several paths (or several comma branches) keeps the
/// position where it was first found.
#[derive(Debug, Default)]
pub struct MatchAccumulator {
    hits: Vec<NodeId>,
    seen: HashSet<NodeId>,
}

impl MatchAccumulator {
    /// An empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hit. Returns false if the node was already recorded.
    pub fn push(&mut self, node: NodeId) -> bool {
        if self.seen.insert(node) {
            self.hits.push(node);
            true
        } else {
            false
        }
    }

    /// Hits so far, in discovery order.
    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.hits
    }

    /// Number of distinct hits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// True if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// The hits, in discovery order.
    #[must_use]
    pub fn into_vec(self) -> Vec<NodeId> {
        self.hits
    }
}

/// Match `segments` starting from `context`, recording every node reached by
/// the last segment.
///
/// With no segments left, `context` itself is the hit. Otherwise the first
/// segment's combinator produces candidates around `context`, the matcher
/// filters them, and each survivor becomes the context for the rest.
pub fn walk(
    tree: &DomTree,
    context: NodeId,
    segments: &[SelectorSegment],
    accumulator: &mut MatchAccumulator,
) {
    let Some((segment, rest)) = segments.split_first() else {
        let _ = accumulator.push(context);
        return;
    };

    for candidate in candidates(tree, context, segment.combinator) {
        if matches(tree, candidate, segment) {
            walk(tree, candidate, rest, accumulator);
        }
    }
}

/// Like [`walk`] but stops at the first hit.
///
/// Visits candidates in the same order as `walk`, so the node returned is the
/// first one `walk` would have recorded.
#[must_use]
pub fn walk_first(tree: &DomTree, context: NodeId, segments: &[SelectorSegment]) -> Option<NodeId> {
    let Some((segment, rest)) = segments.split_first() else {
        return Some(context);
    };

    candidates(tree, context, segment.combinator)
        .into_iter()
        .filter(|&candidate| matches(tree, candidate, segment))
        .find_map(|candidate| walk_first(tree, candidate, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_keeps_first_position() {
        let mut acc = MatchAccumulator::new();
        assert!(acc.push(NodeId(3)));
        assert!(acc.push(NodeId(1)));
        assert!(!acc.push(NodeId(3)));
        assert!(acc.push(NodeId(2)));
        assert_eq!(acc.as_slice(), &[NodeId(3), NodeId(1), NodeId(2)]);
        assert_eq!(acc.len(), 3);
    }

    #[test]
    fn test_walk_with_no_segments_hits_context() {
        let tree = DomTree::new();
        let mut acc = MatchAccumulator::new();
        walk(&tree, NodeId::ROOT, &[], &mut acc);
        assert_eq!(acc.into_vec(), vec![NodeId::ROOT]);
    }
}
