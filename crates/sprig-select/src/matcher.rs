//! Does one node satisfy one segment?
//!
//! Gates run in a fixed order (tag, id, classes, attributes, pseudo-class) and
//! the first failing gate ends the test.

use sprig_common::warning::warn_once;
use sprig_dom::{DomTree, ElementData, NodeId};

use crate::segment::{AttributeTest, Pseudo, PseudoKind, SelectorSegment, TagTest};

/// Test `node` against every predicate of `segment`. Non-element nodes never match.
///
/// The combinator is not consulted here; it only shapes the candidate list.
#[must_use]
pub fn matches(tree: &DomTree, node: NodeId, segment: &SelectorSegment) -> bool {
    let Some(element) = tree.as_element(node) else {
        return false;
    };

    tag_matches(segment.tag.as_ref(), element)
        && id_matches(segment.id.as_deref(), element)
        && classes_match(&segment.classes, element)
        && segment
            .attributes
            .iter()
            .all(|test| attribute_matches(test, element))
        && segment
            .pseudo
            .as_ref()
            .is_none_or(|pseudo| pseudo_matches(pseudo, tree, node))
}

/// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
///
/// Tags are lower-cased on both sides, so this is a plain comparison.
fn tag_matches(tag: Option<&TagTest>, element: &ElementData) -> bool {
    match tag {
        None | Some(TagTest::Universal) => true,
        Some(TagTest::Name(name)) => element.tag_name == *name,
    }
}

/// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
fn id_matches(id: Option<&str>, element: &ElementData) -> bool {
    id.is_none_or(|id| element.id().is_some_and(|ids| ids.iter().any(|v| v == id)))
}

/// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
///
/// Every listed class must be present; an element with no class attribute
/// fails any class test.
fn classes_match(classes: &[String], element: &ElementData) -> bool {
    if classes.is_empty() {
        return true;
    }
    let Some(have) = element.attrs.get("class") else {
        return false;
    };
    classes.iter().all(|class| have.contains(class))
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// A missing attribute fails every test, presence-only included. With an
/// operator, the test passes if any one of the attribute's values satisfies it.
fn attribute_matches(test: &AttributeTest, element: &ElementData) -> bool {
    let Some(values) = element.attrs.get(&test.name) else {
        return false;
    };
    match &test.comparison {
        None => true,
        Some((op, expected)) => values.iter().any(|actual| op.test(actual, expected)),
    }
}

/// [§ 14 Tree-Structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
///
/// Position is counted among the parent's element children. A node without a
/// parent has no position and fails every positional test.
fn pseudo_matches(pseudo: &Pseudo, tree: &DomTree, node: NodeId) -> bool {
    let Some(parent) = tree.parent(node) else {
        return false;
    };
    let siblings: Vec<NodeId> = tree.element_children(parent).collect();
    let Some(index) = siblings.iter().position(|&id| id == node) else {
        return false;
    };

    match pseudo.kind {
        PseudoKind::FirstChild => index == 0,
        PseudoKind::LastChild => index + 1 == siblings.len(),
        PseudoKind::NthChild => {
            nth_child_matches(pseudo.argument.as_deref().unwrap_or_default(), index + 1)
        }
    }
}

/// `position` is 1-based. Accepts `odd`, `even` (any ASCII case) or a decimal
/// literal; anything else never matches.
fn nth_child_matches(argument: &str, position: usize) -> bool {
    if argument.eq_ignore_ascii_case("odd") {
        return position % 2 == 1;
    }
    if argument.eq_ignore_ascii_case("even") {
        return position % 2 == 0;
    }
    if !argument.is_empty() && argument.bytes().all(|b| b.is_ascii_digit()) {
        return argument.parse::<usize>().is_ok_and(|n| n == position);
    }
    warn_once(
        "Selector",
        &format!("nth-child argument {argument:?} never matches (expected a number, odd or even)"),
    );
    false
}
