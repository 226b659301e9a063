//! In-memory board repository for tests and embedding.

use crate::board::{
    domain::{
        Board, BoardChanges, BoardId, Column, ColumnChanges, ColumnId, Position, Task, TaskChanges,
        TaskId, TaskSearch,
    },
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory board repository.
///
/// Cascading deletes and foreign references are enforced the same way a
/// relational store would enforce them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    boards: HashMap<BoardId, Board>,
    columns: HashMap<ColumnId, Column>,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryBoardState {
    fn board_column_ids(&self, board_id: BoardId) -> Vec<ColumnId> {
        self.columns
            .values()
            .filter(|column| column.board_id() == board_id)
            .map(Column::id)
            .collect()
    }

    fn board_tasks(&self, board_id: BoardId) -> impl Iterator<Item = &Task> {
        self.tasks.values().filter(move |task| {
            self.columns
                .get(&task.column_id())
                .is_some_and(|column| column.board_id() == board_id)
        })
    }

    fn remove_column_cascade(&mut self, column_id: ColumnId) -> bool {
        if self.columns.remove(&column_id).is_none() {
            return false;
        }
        self.tasks.retain(|_, task| task.column_id() != column_id);
        true
    }
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> BoardRepositoryResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state.read().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> BoardRepositoryResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state.write().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn insert_board(&self, board: &Board) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if state.boards.contains_key(&board.id()) {
            return Err(BoardRepositoryError::Duplicate(board.id().into()));
        }
        state.boards.insert(board.id(), board.clone());
        Ok(())
    }

    async fn update_board(
        &self,
        id: BoardId,
        changes: &BoardChanges,
    ) -> BoardRepositoryResult<Option<Board>> {
        let mut state = self.write()?;
        Ok(state.boards.get_mut(&id).map(|board| {
            board.apply(changes);
            board.clone()
        }))
    }

    async fn delete_board(&self, id: BoardId) -> BoardRepositoryResult<bool> {
        let mut state = self.write()?;
        if state.boards.remove(&id).is_none() {
            return Ok(false);
        }
        for column_id in state.board_column_ids(id) {
            state.remove_column_cascade(column_id);
        }
        Ok(true)
    }

    async fn find_board(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        Ok(self.read()?.boards.get(&id).cloned())
    }

    async fn list_boards(&self) -> BoardRepositoryResult<Vec<Board>> {
        let mut boards: Vec<Board> = self.read()?.boards.values().cloned().collect();
        boards.sort_by_key(|board| (board.created_at(), board.id()));
        Ok(boards)
    }

    async fn insert_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.boards.contains_key(&column.board_id()) {
            return Err(BoardRepositoryError::MissingParent(
                column.board_id().into(),
            ));
        }
        if state.columns.contains_key(&column.id()) {
            return Err(BoardRepositoryError::Duplicate(column.id().into()));
        }
        state.columns.insert(column.id(), column.clone());
        Ok(())
    }

    async fn update_column(
        &self,
        id: ColumnId,
        changes: &ColumnChanges,
    ) -> BoardRepositoryResult<Option<Column>> {
        let mut state = self.write()?;
        Ok(state.columns.get_mut(&id).map(|column| {
            column.apply(changes);
            column.clone()
        }))
    }

    async fn delete_column(&self, id: ColumnId) -> BoardRepositoryResult<bool> {
        Ok(self.write()?.remove_column_cascade(id))
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        Ok(self.read()?.columns.get(&id).cloned())
    }

    async fn columns_for_board(&self, board_id: BoardId) -> BoardRepositoryResult<Vec<Column>> {
        let state = self.read()?;
        Ok(state
            .columns
            .values()
            .filter(|column| column.board_id() == board_id)
            .cloned()
            .collect())
    }

    async fn column_positions(&self, board_id: BoardId) -> BoardRepositoryResult<Vec<Position>> {
        let state = self.read()?;
        Ok(state
            .columns
            .values()
            .filter(|column| column.board_id() == board_id)
            .map(Column::position)
            .collect())
    }

    async fn insert_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.columns.contains_key(&task.column_id()) {
            return Err(BoardRepositoryError::MissingParent(
                task.column_id().into(),
            ));
        }
        if state.tasks.contains_key(&task.id()) {
            return Err(BoardRepositoryError::Duplicate(task.id().into()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update_task(
        &self,
        id: TaskId,
        changes: &TaskChanges,
    ) -> BoardRepositoryResult<Option<Task>> {
        let mut state = self.write()?;
        if let Some(column_id) = changes.column_id
            && !state.columns.contains_key(&column_id)
        {
            return Err(BoardRepositoryError::MissingParent(column_id.into()));
        }
        Ok(state.tasks.get_mut(&id).map(|task| {
            task.apply(changes);
            task.clone()
        }))
    }

    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<bool> {
        Ok(self.write()?.tasks.remove(&id).is_some())
    }

    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn tasks_for_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.column_id() == column_id)
            .cloned()
            .collect())
    }

    async fn task_positions(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Position>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.column_id() == column_id)
            .map(Task::position)
            .collect())
    }

    async fn count_tasks_in_column(&self, column_id: ColumnId) -> BoardRepositoryResult<u64> {
        let state = self.read()?;
        let count = state
            .tasks
            .values()
            .filter(|task| task.column_id() == column_id)
            .count();
        u64::try_from(count).map_err(BoardRepositoryError::persistence)
    }

    async fn search_tasks(&self, search: &TaskSearch) -> BoardRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut found: Vec<Task> = match search.board_id() {
            Some(board_id) => state
                .board_tasks(board_id)
                .filter(|task| search.matches_text(task))
                .cloned()
                .collect(),
            None => state
                .tasks
                .values()
                .filter(|task| search.matches_text(task))
                .cloned()
                .collect(),
        };
        found.sort_by_key(|task| (task.created_at(), task.id()));
        Ok(found)
    }

    async fn task_counts_by_column(
        &self,
        board_id: BoardId,
    ) -> BoardRepositoryResult<HashMap<ColumnId, u64>> {
        let state = self.read()?;
        let mut counts: HashMap<ColumnId, u64> = HashMap::new();
        for task in state.board_tasks(board_id) {
            *counts.entry(task.column_id()).or_default() += 1;
        }
        Ok(counts)
    }

    async fn oldest_task_created_at(
        &self,
        board_id: BoardId,
    ) -> BoardRepositoryResult<Option<DateTime<Utc>>> {
        let state = self.read()?;
        Ok(state.board_tasks(board_id).map(Task::created_at).min())
    }
}
