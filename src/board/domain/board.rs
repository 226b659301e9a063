//! Board aggregate root.

use super::{BoardId, Title, recorded_now};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Top-level container of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    title: Title,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Persisted title.
    pub title: Title,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changes applied to a board by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardChanges {
    /// Replacement title.
    pub title: Title,
    /// Timestamp recorded as the board's `updated_at`.
    pub updated_at: DateTime<Utc>,
}

impl BoardChanges {
    /// Creates a rename stamped with the current clock time.
    #[must_use]
    pub fn rename(title: Title, clock: &impl Clock) -> Self {
        Self {
            title,
            updated_at: recorded_now(clock),
        }
    }
}

impl Board {
    /// Creates a new board.
    #[must_use]
    pub fn new(title: Title, clock: &impl Clock) -> Self {
        let timestamp = recorded_now(clock);
        Self {
            id: BoardId::new(),
            title,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the board title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies an update in place.
    pub fn apply(&mut self, changes: &BoardChanges) {
        self.title = changes.title.clone();
        self.updated_at = changes.updated_at;
    }
}
