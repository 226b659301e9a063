//! Service layer for board, column, and task collections.

use super::{
    error::{BoardServiceError, BoardServiceResult},
    movement::require_target_column,
};
use crate::board::{
    domain::{
        Board, BoardChanges, BoardId, BoardSnapshot, Column, ColumnChanges, ColumnId,
        ColumnSnapshot, Description, EntityKind, EntityRef, Position, Task, TaskChanges, TaskId,
        TaskSearch, Title, allocate_position, compact_positions, sort_by_rank,
    },
    ports::{BoardEvent, BoardObserver, BoardRepository, NoopBoardObserver},
};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateColumnRequest {
    board_id: BoardId,
    title: String,
    position: Option<Position>,
}

impl CreateColumnRequest {
    /// Creates a request that appends the column after its siblings.
    #[must_use]
    pub fn new(board_id: BoardId, title: impl Into<String>) -> Self {
        Self {
            board_id,
            title: title.into(),
            position: None,
        }
    }

    /// Places the column at an explicit position.
    #[must_use]
    pub const fn at_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    column_id: ColumnId,
    title: String,
    description: Option<String>,
    position: Option<Position>,
}

impl CreateTaskRequest {
    /// Creates a request that appends the task after its siblings.
    #[must_use]
    pub fn new(column_id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            column_id,
            title: title.into(),
            description: None,
            position: None,
        }
    }

    /// Sets the task description. Blank text leaves the task without one.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Places the task at an explicit position.
    #[must_use]
    pub const fn at_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Partial column update. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnUpdate {
    title: Option<String>,
    position: Option<Position>,
}

impl ColumnUpdate {
    /// Creates an update that only refreshes `updated_at`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the position. Siblings are not shifted.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Partial task update. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    title: Option<String>,
    description: Option<String>,
    column_id: Option<ColumnId>,
    position: Option<Position>,
}

impl TaskUpdate {
    /// Creates an update that only refreshes `updated_at`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description. Blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Reassigns the task to another column, possibly on another board.
    #[must_use]
    pub const fn with_column(mut self, column_id: ColumnId) -> Self {
        self.column_id = Some(column_id);
        self
    }

    /// Replaces the position. Siblings are not shifted.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// CRUD and ordered reads over boards, columns, and tasks.
///
/// The service holds no state between calls; every operation re-reads the
/// repository. Successful mutations are reported to the observer.
pub struct OrderedCollectionService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    observer: Arc<dyn BoardObserver>,
}

impl<R, C> Clone for OrderedCollectionService<R, C>
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

impl<R, C> OrderedCollectionService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service that reports to a no-op observer.
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

    /// Returns all boards ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the lookup fails.
    pub async fn list_boards(&self) -> BoardServiceResult<Vec<Board>> {
        Ok(self.repository.list_boards().await?)
    }

    /// Retrieves a board, or `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the lookup fails.
    pub async fn get_board(&self, board_id: BoardId) -> BoardServiceResult<Option<Board>> {
        Ok(self.repository.find_board(board_id).await?)
    }

    /// Creates a board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] for a blank title, or
    /// [`BoardServiceError::Repository`] when persistence fails.
    pub async fn create_board(&self, title: &str) -> BoardServiceResult<Board> {
        let board = Board::new(Title::new(EntityKind::Board, title)?, &*self.clock);
        self.repository.insert_board(&board).await?;
        self.observer.record(&BoardEvent::BoardCreated {
            board_id: board.id(),
        });
        Ok(board)
    }

    /// Renames a board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] for a blank title and
    /// [`BoardServiceError::NotFound`] for an unknown board.
    pub async fn update_board(&self, board_id: BoardId, title: &str) -> BoardServiceResult<Board> {
        let changes = BoardChanges::rename(Title::new(EntityKind::Board, title)?, &*self.clock);
        let board = self
            .repository
            .update_board(board_id, &changes)
            .await?
            .ok_or(BoardServiceError::NotFound(EntityRef::Board(board_id)))?;
        self.observer.record(&BoardEvent::Updated {
            entity: EntityRef::Board(board_id),
        });
        Ok(board)
    }

    /// Deletes a board with its columns and their tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`] when no board was deleted.
    pub async fn delete_board(&self, board_id: BoardId) -> BoardServiceResult<()> {
        let deleted = self.repository.delete_board(board_id).await?;
        self.finish_delete(EntityRef::Board(board_id), deleted)
    }

    /// Retrieves a column, or `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the lookup fails.
    pub async fn get_column(&self, column_id: ColumnId) -> BoardServiceResult<Option<Column>> {
        Ok(self.repository.find_column(column_id).await?)
    }

    /// Lists the columns of a board in rank order.
    ///
    /// An unknown board has no columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the lookup fails.
    pub async fn list_columns(&self, board_id: BoardId) -> BoardServiceResult<Vec<Column>> {
        let mut columns = self.repository.columns_for_board(board_id).await?;
        sort_by_rank(&mut columns);
        Ok(columns)
    }

    /// Creates a column, appending it unless a position is requested.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] for a blank title or position
    /// overflow, and [`BoardServiceError::NotFound`] for an unknown board.
    pub async fn create_column(&self, request: CreateColumnRequest) -> BoardServiceResult<Column> {
        self.repository
            .find_board(request.board_id)
            .await?
            .ok_or(BoardServiceError::NotFound(EntityRef::Board(request.board_id)))?;
        let title = Title::new(EntityKind::Column, &request.title)?;
        let existing = self.repository.column_positions(request.board_id).await?;
        let position = allocate_position(EntityKind::Column, &existing, request.position)?;
        let column = Column::new(request.board_id, title, position, &*self.clock);
        self.repository
            .insert_column(&column)
            .await
            .map_err(BoardServiceError::on_create)?;
        self.observer.record(&BoardEvent::ColumnCreated {
            column_id: column.id(),
            board_id: column.board_id(),
            position,
        });
        Ok(column)
    }

    /// Applies a partial column update.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] for a blank title and
    /// [`BoardServiceError::NotFound`] for an unknown column.
    pub async fn update_column(
        &self,
        column_id: ColumnId,
        update: ColumnUpdate,
    ) -> BoardServiceResult<Column> {
        let mut changes = ColumnChanges::touch(&*self.clock);
        if let Some(raw_title) = update.title {
            changes = changes.with_title(Title::new(EntityKind::Column, raw_title)?);
        }
        if let Some(position) = update.position {
            changes = changes.with_position(position);
        }
        let column = self
            .repository
            .update_column(column_id, &changes)
            .await?
            .ok_or(BoardServiceError::NotFound(EntityRef::Column(column_id)))?;
        self.observer.record(&BoardEvent::Updated {
            entity: EntityRef::Column(column_id),
        });
        Ok(column)
    }

    /// Deletes a column with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`] when no column was deleted.
    pub async fn delete_column(&self, column_id: ColumnId) -> BoardServiceResult<()> {
        let deleted = self.repository.delete_column(column_id).await?;
        self.finish_delete(EntityRef::Column(column_id), deleted)
    }

    /// Retrieves a task, or `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the lookup fails.
    pub async fn get_task(&self, task_id: TaskId) -> BoardServiceResult<Option<Task>> {
        Ok(self.repository.find_task(task_id).await?)
    }

    /// Lists the tasks of a column in rank order.
    ///
    /// An unknown column has no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the lookup fails.
    pub async fn list_tasks(&self, column_id: ColumnId) -> BoardServiceResult<Vec<Task>> {
        let mut tasks = self.repository.tasks_for_column(column_id).await?;
        sort_by_rank(&mut tasks);
        Ok(tasks)
    }

    /// Lists the other tasks of a task's column in rank order.
    ///
    /// An unknown task has no siblings.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the lookup fails.
    pub async fn sibling_tasks(&self, task_id: TaskId) -> BoardServiceResult<Vec<Task>> {
        let Some(task) = self.repository.find_task(task_id).await? else {
            return Ok(Vec::new());
        };
        let mut siblings = self.list_tasks(task.column_id()).await?;
        siblings.retain(|sibling| sibling.id() != task_id);
        Ok(siblings)
    }

    /// Counts the tasks currently in a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the count fails.
    pub async fn count_tasks_in_column(&self, column_id: ColumnId) -> BoardServiceResult<u64> {
        Ok(self.repository.count_tasks_in_column(column_id).await?)
    }

    /// Creates a task, appending it unless a position is requested.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] for a blank title or position
    /// overflow, and [`BoardServiceError::NotFound`] for an unknown column.
    pub async fn create_task(&self, request: CreateTaskRequest) -> BoardServiceResult<Task> {
        self.repository
            .find_column(request.column_id)
            .await?
            .ok_or(BoardServiceError::NotFound(EntityRef::Column(request.column_id)))?;
        let title = Title::new(EntityKind::Task, &request.title)?;
        let description = request.description.and_then(Description::normalize);
        let existing = self.repository.task_positions(request.column_id).await?;
        let position = allocate_position(EntityKind::Task, &existing, request.position)?;
        let task = Task::new(
            request.column_id,
            title,
            description,
            position,
            &*self.clock,
        );
        self.repository
            .insert_task(&task)
            .await
            .map_err(BoardServiceError::on_create)?;
        self.observer.record(&BoardEvent::TaskCreated {
            task_id: task.id(),
            column_id: task.column_id(),
            position,
        });
        Ok(task)
    }

    /// Applies a partial task update.
    ///
    /// Reassigning the column is validated like a move and reported as one.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] for a blank title,
    /// [`BoardServiceError::DanglingReference`] for an unknown target column,
    /// and [`BoardServiceError::NotFound`] for an unknown task.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        update: TaskUpdate,
    ) -> BoardServiceResult<Task> {
        let mut changes = TaskChanges::touch(&*self.clock);
        if let Some(raw_title) = update.title {
            changes = changes.with_title(Title::new(EntityKind::Task, raw_title)?);
        }
        if let Some(raw_description) = update.description {
            changes = changes.with_description(Description::normalize(raw_description));
        }
        if let Some(position) = update.position {
            changes = changes.with_position(position);
        }
        if let Some(column_id) = update.column_id {
            require_target_column(&*self.repository, column_id).await?;
            changes = changes.with_column(column_id);
        }

        let task = self
            .repository
            .update_task(task_id, &changes)
            .await
            .map_err(BoardServiceError::on_relocate)?
            .ok_or(BoardServiceError::NotFound(EntityRef::Task(task_id)))?;
        let event = if update.column_id.is_some() {
            BoardEvent::TaskMoved {
                task_id,
                column_id: task.column_id(),
                position: task.position(),
            }
        } else {
            BoardEvent::Updated {
                entity: EntityRef::Task(task_id),
            }
        };
        self.observer.record(&event);
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`] when no task was deleted.
    pub async fn delete_task(&self, task_id: TaskId) -> BoardServiceResult<()> {
        let deleted = self.repository.delete_task(task_id).await?;
        self.finish_delete(EntityRef::Task(task_id), deleted)
    }

    /// Finds tasks whose title or description contains `query`, ignoring
    /// case, optionally restricted to one board.
    ///
    /// A blank query matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the search fails.
    pub async fn search_tasks(
        &self,
        query: &str,
        board_id: Option<BoardId>,
    ) -> BoardServiceResult<Vec<Task>> {
        let Some(search) = TaskSearch::new(query, board_id) else {
            return Ok(Vec::new());
        };
        Ok(self.repository.search_tasks(&search).await?)
    }

    /// Materializes a board with its ordered columns and ordered tasks.
    ///
    /// Returns `None` when the board does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when a lookup fails.
    pub async fn board_snapshot(
        &self,
        board_id: BoardId,
    ) -> BoardServiceResult<Option<BoardSnapshot>> {
        let Some(board) = self.repository.find_board(board_id).await? else {
            return Ok(None);
        };
        let columns = self.list_columns(board_id).await?;
        let mut snapshots = Vec::with_capacity(columns.len());
        for column in columns {
            let tasks = self.list_tasks(column.id()).await?;
            snapshots.push(ColumnSnapshot { column, tasks });
        }
        Ok(Some(BoardSnapshot {
            board,
            columns: snapshots,
        }))
    }

    /// Renumbers a board's columns to `0..n` in rank order.
    ///
    /// Only columns whose position changes are written. Returns the columns
    /// in their new order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`] for an unknown board.
    pub async fn repair_column_positions(
        &self,
        board_id: BoardId,
    ) -> BoardServiceResult<Vec<Column>> {
        if self.repository.find_board(board_id).await?.is_none() {
            return Err(BoardServiceError::NotFound(EntityRef::Board(board_id)));
        }
        let columns = self.list_columns(board_id).await?;
        let plan = compact_positions(EntityKind::Column, &columns)?;
        let mut renumbered = 0_usize;
        for step in &plan {
            let changes = ColumnChanges::touch(&*self.clock).with_position(step.to);
            if self
                .repository
                .update_column(step.id, &changes)
                .await?
                .is_some()
            {
                renumbered = renumbered.saturating_add(1);
            }
        }
        self.record_compaction(EntityKind::Column, EntityRef::Board(board_id), renumbered);
        self.list_columns(board_id).await
    }

    /// Renumbers a column's tasks to `0..n` in rank order.
    ///
    /// Only tasks whose position changes are written. Returns the tasks in
    /// their new order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`] for an unknown column.
    pub async fn repair_task_positions(&self, column_id: ColumnId) -> BoardServiceResult<Vec<Task>> {
        if self.repository.find_column(column_id).await?.is_none() {
            return Err(BoardServiceError::NotFound(EntityRef::Column(column_id)));
        }
        let tasks = self.list_tasks(column_id).await?;
        let plan = compact_positions(EntityKind::Task, &tasks)?;
        let mut renumbered = 0_usize;
        for step in &plan {
            let changes = TaskChanges::touch(&*self.clock).with_position(step.to);
            if self
                .repository
                .update_task(step.id, &changes)
                .await?
                .is_some()
            {
                renumbered = renumbered.saturating_add(1);
            }
        }
        self.record_compaction(EntityKind::Task, EntityRef::Column(column_id), renumbered);
        self.list_tasks(column_id).await
    }

    fn finish_delete(&self, entity: EntityRef, deleted: bool) -> BoardServiceResult<()> {
        if !deleted {
            return Err(BoardServiceError::NotFound(entity));
        }
        self.observer.record(&BoardEvent::Deleted { entity });
        Ok(())
    }

    fn record_compaction(&self, kind: EntityKind, parent: EntityRef, renumbered: usize) {
        if renumbered > 0 {
            self.observer.record(&BoardEvent::PositionsCompacted {
                kind,
                parent,
                renumbered,
            });
        }
    }
}
