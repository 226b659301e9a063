//! Tasks: ordered children of a column.

use super::{ColumnId, Description, Position, Ranked, TaskId, Title, recorded_now};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Ordered task within a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    column_id: ColumnId,
    title: Title,
    description: Option<Description>,
    position: Position,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning column.
    pub column_id: ColumnId,
    /// Persisted title.
    pub title: Title,
    /// Persisted description, if any.
    pub description: Option<Description>,
    /// Persisted position.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial task update. `None` fields are left unchanged.
///
/// `description` distinguishes "leave as is" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<Title>,
    /// Replacement description.
    pub description: Option<Option<Description>>,
    /// Replacement owning column.
    pub column_id: Option<ColumnId>,
    /// Replacement position.
    pub position: Option<Position>,
    /// Timestamp recorded as the task's `updated_at`.
    pub updated_at: DateTime<Utc>,
}

impl TaskChanges {
    /// Creates an empty change set stamped with the current clock time.
    #[must_use]
    pub fn touch(clock: &impl Clock) -> Self {
        Self {
            title: None,
            description: None,
            column_id: None,
            position: None,
            updated_at: recorded_now(clock),
        }
    }

    /// Creates the change set of a move to `column_id` at `position`.
    #[must_use]
    pub fn relocate(column_id: ColumnId, position: Position, clock: &impl Clock) -> Self {
        Self::touch(clock)
            .with_column(column_id)
            .with_position(position)
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: Title) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<Description>) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets the replacement owning column.
    #[must_use]
    pub const fn with_column(mut self, column_id: ColumnId) -> Self {
        self.column_id = Some(column_id);
        self
    }

    /// Sets the replacement position.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

impl Task {
    /// Creates a new task at an already allocated position.
    #[must_use]
    pub fn new(
        column_id: ColumnId,
        title: Title,
        description: Option<Description>,
        position: Position,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = recorded_now(clock);
        Self {
            id: TaskId::new(),
            column_id,
            title,
            description,
            position,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            column_id: data.column_id,
            title: data.title,
            description: data.description,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning column.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Returns the position among the column's tasks.
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
    pub fn apply(&mut self, changes: &TaskChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(column_id) = changes.column_id {
            self.column_id = column_id;
        }
        if let Some(position) = changes.position {
            self.position = position;
        }
        self.updated_at = changes.updated_at;
    }
}

impl Ranked for Task {
    type Id = TaskId;

    fn rank_id(&self) -> TaskId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
