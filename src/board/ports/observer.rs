//! Observability port for board mutations.
//!
//! Services report every successful mutation to an injected observer instead
//! of writing to shared process state.

use crate::board::domain::{BoardId, ColumnId, EntityKind, EntityRef, Position, TaskId};

/// A successful mutation reported by the board services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A board was created.
    BoardCreated {
        /// New board.
        board_id: BoardId,
    },
    /// A column was created.
    ColumnCreated {
        /// New column.
        column_id: ColumnId,
        /// Owning board.
        board_id: BoardId,
        /// Allocated position.
        position: Position,
    },
    /// A task was created.
    TaskCreated {
        /// New task.
        task_id: TaskId,
        /// Owning column.
        column_id: ColumnId,
        /// Allocated position.
        position: Position,
    },
    /// An entity's own fields were updated.
    Updated {
        /// Updated entity.
        entity: EntityRef,
    },
    /// A task was reassigned to a column and position.
    TaskMoved {
        /// Moved task.
        task_id: TaskId,
        /// Column the task now belongs to.
        column_id: ColumnId,
        /// Position in that column.
        position: Position,
    },
    /// An entity was deleted, cascading to its descendants.
    Deleted {
        /// Deleted entity.
        entity: EntityRef,
    },
    /// Siblings were renumbered to contiguous positions.
    PositionsCompacted {
        /// Kind of the renumbered siblings.
        kind: EntityKind,
        /// Parent whose children were renumbered.
        parent: EntityRef,
        /// Number of siblings whose position changed.
        renumbered: usize,
    },
}

impl BoardEvent {
    /// Returns a short, stable event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BoardCreated { .. } => "board_created",
            Self::ColumnCreated { .. } => "column_created",
            Self::TaskCreated { .. } => "task_created",
            Self::Updated { .. } => "updated",
            Self::TaskMoved { .. } => "task_moved",
            Self::Deleted { .. } => "deleted",
            Self::PositionsCompacted { .. } => "positions_compacted",
        }
    }
}

/// Receives board mutation events.
pub trait BoardObserver: Send + Sync {
    /// Records a successful mutation.
    fn record(&self, event: &BoardEvent);
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBoardObserver;

impl BoardObserver for NoopBoardObserver {
    fn record(&self, _event: &BoardEvent) {}
}
