//! Memoised selector plans.
//!
//! Plans are keyed by the exact branch string (no normalisation: `"ul>li"` and
//! `"ul > li"` are separate entries). Only successful tokenizations are stored,
//! so a caller can retry a corrected selector without the failure lingering.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use crate::error::Result;
use crate::segment::SelectorSegment;
use crate::tokenizer::tokenize;

/// A compiled branch, shared between the cache and its callers.
pub type BranchPlan = Arc<[SelectorSegment]>;

/// Branch-string to plan cache, optionally bounded.
///
/// Unbounded by default. With a capacity, inserting past it evicts the least
/// recently used entry.
pub struct PlanCache {
    entries: LruCache<String, BranchPlan>,
    capacity: Option<NonZeroUsize>,
    hits: u64,
    misses: u64,
}

/// Counters describing cache behaviour since creation or the last [`PlanCache::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cached branch plans.
    pub entries: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to tokenize (including failed ones).
    pub misses: u64,
    /// The configured bound, `None` when unbounded.
    pub capacity: Option<usize>,
}

impl PlanCache {
    /// An unbounded cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: LruCache::unbounded(),
            capacity: None,
            hits: 0,
            misses: 0,
        }
    }

    /// A cache holding at most `capacity` plans (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            capacity: Some(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// The configured bound, or `None` if unbounded.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity.map(NonZeroUsize::get)
    }

    /// Return the plan for `branch`, tokenizing and storing it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the tokenizer's error; nothing is cached in that case.
    pub fn get_or_tokenize(&mut self, branch: &str) -> Result<BranchPlan> {
        if let Some(plan) = self.entries.get(branch) {
            self.hits += 1;
            return Ok(Arc::clone(plan));
        }

        self.misses += 1;
        let plan: BranchPlan = tokenize(branch)?.into();
        let _ = self.entries.put(branch.to_string(), Arc::clone(&plan));
        Ok(plan)
    }

    /// Look up a cached plan without tokenizing or touching its recency.
    #[must_use]
    pub fn peek(&self, branch: &str) -> Option<BranchPlan> {
        self.entries.peek(branch).map(Arc::clone)
    }

    /// Number of cached plans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            capacity: self.capacity(),
        }
    }

    /// Drop every cached plan and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlanCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanCache")
            .field("entries", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}
