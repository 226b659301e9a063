//! Repository port for board, column, and task persistence.
//!
//! Implementations provide row-level operations only. Ordering, allocation,
//! and validation live in the domain and service layers. Every method is a
//! single logical store operation; updates are applied atomically per row.

use crate::board::domain::{
    Board, BoardChanges, BoardId, Column, ColumnChanges, ColumnId, EntityRef, Position, Task,
    TaskChanges, TaskId, TaskSearch,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Board persistence contract.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Stores a new board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Duplicate`] when the identifier exists.
    async fn insert_board(&self, board: &Board) -> BoardRepositoryResult<()>;

    /// Applies changes to a board and returns the updated row.
    ///
    /// Returns `None` when the board does not exist.
    async fn update_board(
        &self,
        id: BoardId,
        changes: &BoardChanges,
    ) -> BoardRepositoryResult<Option<Board>>;

    /// Deletes a board together with its columns and their tasks.
    ///
    /// Returns whether a board row was deleted.
    async fn delete_board(&self, id: BoardId) -> BoardRepositoryResult<bool>;

    /// Finds a board by identifier.
    async fn find_board(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>>;

    /// Returns all boards ordered by creation time.
    async fn list_boards(&self) -> BoardRepositoryResult<Vec<Board>>;

    /// Stores a new column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::MissingParent`] when the owning board
    /// does not exist.
    async fn insert_column(&self, column: &Column) -> BoardRepositoryResult<()>;

    /// Applies changes to a column and returns the updated row.
    ///
    /// Returns `None` when the column does not exist.
    async fn update_column(
        &self,
        id: ColumnId,
        changes: &ColumnChanges,
    ) -> BoardRepositoryResult<Option<Column>>;

    /// Deletes a column together with its tasks.
    ///
    /// Returns whether a column row was deleted.
    async fn delete_column(&self, id: ColumnId) -> BoardRepositoryResult<bool>;

    /// Finds a column by identifier.
    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>>;

    /// Returns the columns of a board in unspecified order.
    async fn columns_for_board(&self, board_id: BoardId) -> BoardRepositoryResult<Vec<Column>>;

    /// Returns the positions of a board's columns.
    async fn column_positions(&self, board_id: BoardId) -> BoardRepositoryResult<Vec<Position>>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::MissingParent`] when the owning column
    /// does not exist.
    async fn insert_task(&self, task: &Task) -> BoardRepositoryResult<()>;

    /// Applies changes to a task and returns the updated row.
    ///
    /// Returns `None` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::MissingParent`] when the changes
    /// reassign the task to a column that does not exist.
    async fn update_task(
        &self,
        id: TaskId,
        changes: &TaskChanges,
    ) -> BoardRepositoryResult<Option<Task>>;

    /// Deletes a task.
    ///
    /// Returns whether a task row was deleted.
    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<bool>;

    /// Finds a task by identifier.
    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>>;

    /// Returns the tasks of a column in unspecified order.
    async fn tasks_for_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>>;

    /// Returns the positions of a column's tasks.
    async fn task_positions(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Position>>;

    /// Counts the tasks of a column.
    async fn count_tasks_in_column(&self, column_id: ColumnId) -> BoardRepositoryResult<u64>;

    /// Returns tasks whose title or description contains the search text,
    /// ignoring case, ordered by creation time.
    async fn search_tasks(&self, search: &TaskSearch) -> BoardRepositoryResult<Vec<Task>>;

    /// Counts tasks per column of a board in one grouped query.
    ///
    /// Columns without tasks may be omitted.
    async fn task_counts_by_column(
        &self,
        board_id: BoardId,
    ) -> BoardRepositoryResult<HashMap<ColumnId, u64>>;

    /// Returns the earliest task creation time across a board's columns.
    async fn oldest_task_created_at(
        &self,
        board_id: BoardId,
    ) -> BoardRepositoryResult<Option<DateTime<Utc>>>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// An entity with the same identifier already exists.
    #[error("duplicate identifier: {0}")]
    Duplicate(EntityRef),

    /// A referenced parent entity does not exist.
    #[error("referenced {0} does not exist")]
    MissingParent(EntityRef),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
