//! Columns: ordered children of a board.

use super::{BoardId, ColumnId, Position, Ranked, Title, recorded_now};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Ordered column within a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    board_id: BoardId,
    title: Title,
    position: Position,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedColumnData {
    /// Persisted column identifier.
    pub id: ColumnId,
    /// Owning board.
    pub board_id: BoardId,
    /// Persisted title.
    pub title: Title,
    /// Persisted position.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial column update. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnChanges {
    /// Replacement title.
    pub title: Option<Title>,
    /// Replacement position.
    pub position: Option<Position>,
    /// Timestamp recorded as the column's `updated_at`.
    pub updated_at: DateTime<Utc>,
}

impl ColumnChanges {
    /// Creates an empty change set stamped with the current clock time.
    #[must_use]
    pub fn touch(clock: &impl Clock) -> Self {
        Self {
            title: None,
            position: None,
            updated_at: recorded_now(clock),
        }
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: Title) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the replacement position.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

impl Column {
    /// Creates a new column at an already allocated position.
    #[must_use]
    pub fn new(board_id: BoardId, title: Title, position: Position, clock: &impl Clock) -> Self {
        let timestamp = recorded_now(clock);
        Self {
            id: ColumnId::new(),
            board_id,
            title,
            position,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedColumnData) -> Self {
        Self {
            id: data.id,
            board_id: data.board_id,
            title: data.title,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the owning board.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the column title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the position among the board's columns.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
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

    /// Applies a partial update in place.
    pub fn apply(&mut self, changes: &ColumnChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(position) = changes.position {
            self.position = position;
        }
        self.updated_at = changes.updated_at;
    }
}

impl Ranked for Column {
    type Id = ColumnId;

    fn rank_id(&self) -> ColumnId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
