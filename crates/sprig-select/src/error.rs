//! Error types for selector parsing.
//!
//! Matching itself cannot fail; every error here is raised while turning a
//! selector string into a plan, before any node is visited.

use thiserror::Error;

/// Result alias for selector operations.
pub type Result<T> = std::result::Result<T, SelectorError>;

/// A selector that cannot be turned into a match plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector (or the branch handed to the tokenizer) has nothing in it.
    #[error("empty selector: {selector:?}")]
    Empty {
        /// The selector as given.
        selector: String,
    },

    /// Part of a branch falls outside the supported grammar.
    #[error("unsupported selector syntax in {branch:?} at byte {offset}: {remainder:?}")]
    Unparsed {
        /// The branch being tokenized.
        branch: String,
        /// Byte offset where parsing stopped.
        offset: usize,
        /// The text that could not be accounted for.
        remainder: String,
    },

    /// A branch made only of combinators, such as `">"`.
    #[error("selector branch {branch:?} has no simple selector")]
    NoSimpleSelector {
        /// The branch being tokenized.
        branch: String,
    },

    /// Wraps a branch error with the full selector it came from.
    #[error("invalid selector {selector:?}")]
    InSelector {
        /// The complete selector string passed to the query.
        selector: String,
        /// The branch-level failure.
        #[source]
        source: Box<SelectorError>,
    },
}

impl SelectorError {
    /// The innermost branch-level error.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::InSelector { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
