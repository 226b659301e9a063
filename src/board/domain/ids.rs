//! Identifier types for boards, columns, and tasks.
//!
//! Identifiers wrap version 7 UUIDs, so ordering two identifiers generated by
//! the same process follows their creation order. Ordering is used as the last
//! tie-break when siblings share a position and a creation timestamp.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new time-ordered identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id! {
    /// Unique identifier for a board.
    BoardId
}

entity_id! {
    /// Unique identifier for a column.
    ColumnId
}

entity_id! {
    /// Unique identifier for a task.
    TaskId
}

/// Kind of entity managed by the board core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A board.
    Board,
    /// A column within a board.
    Column,
    /// A task within a column.
    Task,
}

impl EntityKind {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::Column => "column",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a single entity, used in error reporting and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    /// A board reference.
    Board(BoardId),
    /// A column reference.
    Column(ColumnId),
    /// A task reference.
    Task(TaskId),
}

impl EntityRef {
    /// Returns the kind of the referenced entity.
    #[must_use]
    pub const fn kind(self) -> EntityKind {
        match self {
            Self::Board(_) => EntityKind::Board,
            Self::Column(_) => EntityKind::Column,
            Self::Task(_) => EntityKind::Task,
        }
    }

    /// Returns the referenced UUID.
    #[must_use]
    pub const fn uuid(self) -> Uuid {
        match self {
            Self::Board(id) => id.into_inner(),
            Self::Column(id) => id.into_inner(),
            Self::Task(id) => id.into_inner(),
        }
    }
}

impl From<BoardId> for EntityRef {
    fn from(id: BoardId) -> Self {
        Self::Board(id)
    }
}

impl From<ColumnId> for EntityRef {
    fn from(id: ColumnId) -> Self {
        Self::Column(id)
    }
}

impl From<TaskId> for EntityRef {
    fn from(id: TaskId) -> Self {
        Self::Task(id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.uuid())
    }
}
