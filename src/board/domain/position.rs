//! Sibling positions, allocation, and rank ordering.
//!
//! Positions are plain integers. Allocation never shifts siblings, so two
//! siblings may share a position after concurrent writes. Reads order siblings
//! by their [`RankKey`]: position first, then creation time, then identifier.
//! Contiguous renumbering only happens through [`compact_positions`].

use super::{BoardDomainError, EntityKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer rank of an entity among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(i32);

impl Position {
    /// Position assigned to the first sibling of an empty parent.
    pub const FIRST: Self = Self(0);

    /// Creates a position from its raw value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Position {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Computes the position of a new sibling.
///
/// A requested position is used verbatim. Otherwise the new sibling is
/// appended after the current maximum, or placed at [`Position::FIRST`] when
/// the parent has no children yet.
///
/// # Errors
///
/// Returns [`BoardDomainError::PositionOverflow`] when the maximum sibling
/// position is already `i32::MAX`.
pub fn allocate_position(
    kind: EntityKind,
    existing: &[Position],
    requested: Option<Position>,
) -> Result<Position, BoardDomainError> {
    if let Some(position) = requested {
        return Ok(position);
    }
    let Some(max) = existing.iter().copied().max() else {
        return Ok(Position::FIRST);
    };
    max.0
        .checked_add(1)
        .map(Position)
        .ok_or(BoardDomainError::PositionOverflow(kind, max.0))
}

/// Deterministic sort key for siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankKey<I> {
    /// Stored position.
    pub position: Position,
    /// Creation timestamp, the first tie-break.
    pub created_at: DateTime<Utc>,
    /// Identifier, the final tie-break.
    pub id: I,
}

/// Entities ordered among siblings by position.
pub trait Ranked {
    /// Identifier type used as the final tie-break.
    type Id: Copy + Ord;

    /// Returns the entity identifier.
    fn rank_id(&self) -> Self::Id;

    /// Returns the stored position.
    fn position(&self) -> Position;

    /// Returns the creation timestamp.
    fn created_at(&self) -> DateTime<Utc>;

    /// Returns the full sort key.
    fn rank_key(&self) -> RankKey<Self::Id> {
        RankKey {
            position: self.position(),
            created_at: self.created_at(),
            id: self.rank_id(),
        }
    }
}

/// Sorts siblings into display order.
pub fn sort_by_rank<T: Ranked>(siblings: &mut [T]) {
    siblings.sort_by_key(T::rank_key);
}

/// A position change produced by [`compact_positions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renumbering<I> {
    /// Entity whose position changes.
    pub id: I,
    /// Position before compaction.
    pub from: Position,
    /// Position after compaction.
    pub to: Position,
}

/// Plans the compaction of siblings into positions `0..n`.
///
/// Relative rank order is preserved. Only siblings whose position differs
/// from their rank index are returned.
///
/// # Errors
///
/// Returns [`BoardDomainError::TooManySiblings`] when the rank index of a
/// sibling does not fit in an `i32`.
pub fn compact_positions<T: Ranked>(
    kind: EntityKind,
    siblings: &[T],
) -> Result<Vec<Renumbering<T::Id>>, BoardDomainError> {
    let mut keys: Vec<RankKey<T::Id>> = siblings.iter().map(T::rank_key).collect();
    keys.sort_unstable();

    let mut changes = Vec::new();
    for (index, key) in keys.into_iter().enumerate() {
        let target = i32::try_from(index).map_err(|_| BoardDomainError::TooManySiblings {
            kind,
            count: siblings.len(),
        })?;
        if key.position.0 != target {
            changes.push(Renumbering {
                id: key.id,
                from: key.position,
                to: Position(target),
            });
        }
    }
    Ok(changes)
}
