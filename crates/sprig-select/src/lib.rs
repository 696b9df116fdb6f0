//! CSS-like selector engine for sprig node trees.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - selector branch to [`SelectorSegment`] list, rejecting any
//!   text outside the supported grammar
//! - **Plan cache** - memoised plans keyed by the exact branch string
//! - **Candidates** - search space per combinator (descendant, child, `+`, `~`)
//! - **Matcher** - tag, id, class, attribute (`=`, `^=`, `$=`, `*=`) and
//!   positional pseudo-class (`:first-child`, `:last-child`, `:nth-child`) tests
//! - **Walker** - depth-first evaluation with identity-based, order-preserving
//!   deduplication across comma branches
//!
//! # Not Supported
//!
//! - `:not()`, `:nth-of-type`, `an+b` arguments and every other pseudo-class
//! - Attribute case-insensitivity flags, `~=` and `|=`
//! - Specificity and cascade
//!
//! # Example
//!
//! ```
//! use sprig_dom::{DomTree, NodeId};
//!
//! let mut tree = DomTree::new();
//! let ul = tree.create_child(NodeId::ROOT, "ul", None, &[]);
//! let one = tree.create_child(ul, "li", Some("1"), &[]);
//! let two = tree.create_child(ul, "li", Some("2"), &[("class", "x")]);
//!
//! assert_eq!(sprig_select::select(&tree, ul, "li.x").unwrap(), vec![two]);
//! assert_eq!(sprig_select::select_first(&tree, ul, "li").unwrap(), Some(one));
//! ```

/// Plan memoisation.
pub mod cache;
/// Candidate generation per combinator.
pub mod candidates;
/// Parse errors.
pub mod error;
/// Single node / single segment predicate.
pub mod matcher;
/// Selector plan data model.
pub mod segment;
/// Branch tokenizer.
pub mod tokenizer;
/// Depth-first driver and match accumulator.
pub mod walker;

use std::sync::{LazyLock, Mutex, PoisonError};

use sprig_dom::{DomTree, NodeId};

pub use cache::{BranchPlan, CacheStats, PlanCache};
pub use error::{Result, SelectorError};
pub use segment::{
    AttributeOperator, AttributeTest, Combinator, Pseudo, PseudoKind, SelectorSegment, TagTest,
    branch_to_string,
};
pub use tokenizer::tokenize;
pub use walker::MatchAccumulator;

/// The engine behind the free functions [`select`], [`select_first`] and [`plan`].
static GLOBAL: LazyLock<SelectorEngine> = LazyLock::new(SelectorEngine::new);

/// Split a selector list into trimmed, non-empty branches.
///
/// This is a plain split on `,`: a comma inside a quoted attribute value still
/// separates branches, so `[title="a,b"]` is read as two broken branches.
pub fn split_branches(selector: &str) -> impl Iterator<Item = &str> {
    selector
        .split(',')
        .map(str::trim)
        .filter(|branch| !branch.is_empty())
}

/// A selector evaluator with its own plan cache.
///
/// Queries never mutate the tree. The cache is guarded by a mutex that is
/// held only while looking up or inserting a plan, never while matching.
#[derive(Debug, Default)]
pub struct SelectorEngine {
    cache: Mutex<PlanCache>,
}

impl SelectorEngine {
    /// An engine with an unbounded plan cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine whose cache keeps at most `capacity` plans, evicting the
    /// least recently used.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(PlanCache::with_capacity(capacity)),
        }
    }

    /// The plan of every branch of `selector`, in branch order.
    ///
    /// # Errors
    ///
    /// [`SelectorError::Empty`] if no branch is left after splitting, or
    /// [`SelectorError::InSelector`] wrapping the first branch that fails to
    /// tokenize. A failing branch fails the whole selector.
    pub fn plan(&self, selector: &str) -> Result<Vec<BranchPlan>> {
        let plans = split_branches(selector)
            .map(|branch| {
                self.branch_plan(branch)
                    .map_err(|source| SelectorError::InSelector {
                        selector: selector.to_string(),
                        source: Box::new(source),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        if plans.is_empty() {
            return Err(SelectorError::Empty {
                selector: selector.to_string(),
            });
        }
        Ok(plans)
    }

    fn branch_plan(&self, branch: &str) -> Result<BranchPlan> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_tokenize(branch)
    }

    /// Every node under `root` matching `selector`, in discovery order, each
    /// node at most once. `root` itself is never a result.
    ///
    /// Branches are walked left to right into one shared accumulator, so a
    /// node matched by several branches sits where the earliest one found it.
    ///
    /// # Errors
    ///
    /// Fails if `selector` does not parse; see [`SelectorEngine::plan`].
    /// No match is not an error.
    pub fn select(&self, tree: &DomTree, root: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let plans = self.plan(selector)?;
        let mut accumulator = MatchAccumulator::new();
        for plan in &plans {
            walker::walk(tree, root, plan, &mut accumulator);
        }
        Ok(accumulator.into_vec())
    }

    /// The first node [`SelectorEngine::select`] would return, without
    /// collecting the rest.
    ///
    /// # Errors
    ///
    /// Fails if `selector` does not parse, even if an earlier branch matched.
    pub fn select_first(
        &self,
        tree: &DomTree,
        root: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>> {
        let plans = self.plan(selector)?;
        Ok(plans
            .iter()
            .find_map(|plan| walker::walk_first(tree, root, plan)))
    }

    /// Cache counters for this engine.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stats()
    }

    /// Number of cached branch plans.
    #[must_use]
    pub fn cached_plans(&self) -> usize {
        self.cache_stats().entries
    }

    /// Forget every cached plan.
    pub fn clear_cache(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// [`SelectorEngine::select`] on the process-wide engine.
///
/// # Errors
///
/// Fails if `selector` does not parse.
pub fn select(tree: &DomTree, root: NodeId, selector: &str) -> Result<Vec<NodeId>> {
    GLOBAL.select(tree, root, selector)
}

/// [`SelectorEngine::select_first`] on the process-wide engine.
///
/// # Errors
///
/// Fails if `selector` does not parse.
pub fn select_first(tree: &DomTree, root: NodeId, selector: &str) -> Result<Option<NodeId>> {
    GLOBAL.select_first(tree, root, selector)
}

/// [`SelectorEngine::plan`] on the process-wide engine.
///
/// # Errors
///
/// Fails if `selector` does not parse.
pub fn plan(selector: &str) -> Result<Vec<BranchPlan>> {
    GLOBAL.plan(selector)
}

/// The process-wide engine used by the free functions.
#[must_use]
pub fn global_engine() -> &'static SelectorEngine {
    &GLOBAL
}
