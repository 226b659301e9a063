//! Cross-column task moves.

use super::error::{BoardServiceError, BoardServiceResult};
use crate::board::{
    domain::{ColumnId, EntityRef, Position, Task, TaskChanges, TaskId},
    ports::{BoardEvent, BoardObserver, BoardRepository, NoopBoardObserver},
};
use mockable::Clock;
use std::sync::Arc;

/// Confirms that a column a task is being moved into exists.
pub(super) async fn require_target_column<R>(
    repository: &R,
    column_id: ColumnId,
) -> BoardServiceResult<()>
where
    R: BoardRepository + ?Sized,
{
    repository
        .find_column(column_id)
        .await?
        .map(drop)
        .ok_or(BoardServiceError::DanglingReference(EntityRef::Column(
            column_id,
        )))
}

/// Moves tasks between columns, including across boards.
///
/// A move is a single-row update of the task's column and position. Other
/// tasks are never shifted; rank ties are resolved when reading.
pub struct MoveCoordinator<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    observer: Arc<dyn BoardObserver>,
}

impl<R, C> Clone for MoveCoordinator<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            observer: Arc::clone(&self.observer),
        }
    }
}

impl<R, C> MoveCoordinator<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator that reports to a no-op observer.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            observer: Arc::new(NoopBoardObserver),
        }
    }

    /// Replaces the mutation observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn BoardObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Places a task in `target_column_id` at `target_position`.
    ///
    /// The target column is checked before the task, so a move with both
    /// identifiers unknown reports the column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::DanglingReference`] for an unknown target
    /// column and [`BoardServiceError::NotFound`] for an unknown task.
    pub async fn move_task(
        &self,
        task_id: TaskId,
        target_column_id: ColumnId,
        target_position: Position,
    ) -> BoardServiceResult<Task> {
        require_target_column(&*self.repository, target_column_id).await?;
        let changes = TaskChanges::relocate(target_column_id, target_position, &*self.clock);
        let task = self
            .repository
            .update_task(task_id, &changes)
            .await
            .map_err(BoardServiceError::on_relocate)?
            .ok_or(BoardServiceError::NotFound(EntityRef::Task(task_id)))?;
        self.observer.record(&BoardEvent::TaskMoved {
            task_id,
            column_id: task.column_id(),
            position: task.position(),
        });
        Ok(task)
    }
}
