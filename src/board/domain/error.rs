//! Error types for board domain validation.

use super::EntityKind;
use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The title is empty after trimming.
    #[error("{0} title must not be empty")]
    EmptyTitle(EntityKind),

    /// Appending after the current maximum would leave the `i32` range.
    #[error("no {0} position is available after {1}")]
    PositionOverflow(EntityKind, i32),

    /// A sibling collection is too large to renumber into `i32` positions.
    #[error("cannot renumber {count} {kind} siblings into contiguous positions")]
    TooManySiblings {
        /// Kind of the renumbered siblings.
        kind: EntityKind,
        /// Number of siblings in the collection.
        count: usize,
    },
}
