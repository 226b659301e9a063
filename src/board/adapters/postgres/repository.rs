//! `PostgreSQL` repository implementation for boards, columns, and tasks.

use super::{
    models::{
        BoardChangeset, BoardRow, ColumnChangeset, ColumnRow, ColumnTaskCountRow, NewBoardRow,
        NewColumnRow, NewTaskRow, OldestTaskRow, TaskChangeset, TaskRow,
    },
    schema::{board_columns, boards, tasks},
};
use crate::board::{
    domain::{
        Board, BoardChanges, BoardId, Column, ColumnChanges, ColumnId, Description, EntityRef,
        PersistedBoardData, PersistedColumnData, PersistedTaskData, Position, Task, TaskChanges,
        TaskId, TaskSearch, Title,
    },
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use crate::config::StoreConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL creating the board tables.
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-19-000000_create_board_tables/up.sql");

/// Builds a connection pool from store configuration.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::Persistence`] when the pool cannot open
/// its initial connections.
pub fn build_pool(config: &StoreConfig) -> BoardRepositoryResult<BoardPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url());
    Pool::builder()
        .max_size(config.pool_max_size())
        .connection_timeout(config.pool_timeout())
        .build(manager)
        .map_err(BoardRepositoryError::persistence)
}

/// `PostgreSQL`-backed board repository.
///
/// Each call checks out one pooled connection on a blocking thread and
/// releases it when the single statement completes.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: BoardPgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    /// Creates the board tables when they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the DDL fails.
    pub async fn apply_schema(&self) -> BoardRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(SCHEMA_SQL)
                .map_err(BoardRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn insert_board(&self, board: &Board) -> BoardRepositoryResult<()> {
        let entity = EntityRef::Board(board.id());
        let new_row = NewBoardRow {
            id: board.id().into_inner(),
            title: board.title().as_str().to_owned(),
            created_at: board.created_at(),
            updated_at: board.updated_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(boards::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_write_error(err, entity, entity))?;
            Ok(())
        })
        .await
    }

    async fn update_board(
        &self,
        id: BoardId,
        changes: &BoardChanges,
    ) -> BoardRepositoryResult<Option<Board>> {
        let changeset = BoardChangeset {
            title: changes.title.as_str().to_owned(),
            updated_at: changes.updated_at,
        };
        self.run_blocking(move |connection| {
            let row = diesel::update(boards::table.find(id.into_inner()))
                .set(&changeset)
                .returning(BoardRow::as_returning())
                .get_result::<BoardRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            Ok(row.map(row_to_board))
        })
        .await
    }

    async fn delete_board(&self, id: BoardId) -> BoardRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(boards::table.find(id.into_inner()))
                .execute(connection)
                .map_err(BoardRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_board(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        self.run_blocking(move |connection| {
            let row = boards::table
                .find(id.into_inner())
                .select(BoardRow::as_select())
                .first::<BoardRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            Ok(row.map(row_to_board))
        })
        .await
    }

    async fn list_boards(&self) -> BoardRepositoryResult<Vec<Board>> {
        self.run_blocking(move |connection| {
            let rows = boards::table
                .order((boards::created_at.asc(), boards::id.asc()))
                .select(BoardRow::as_select())
                .load::<BoardRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_board).collect())
        })
        .await
    }

    async fn insert_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let entity = EntityRef::Column(column.id());
        let parent = EntityRef::Board(column.board_id());
        let new_row = NewColumnRow {
            id: column.id().into_inner(),
            board_id: column.board_id().into_inner(),
            title: column.title().as_str().to_owned(),
            position: column.position().value(),
            created_at: column.created_at(),
            updated_at: column.updated_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(board_columns::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_write_error(err, parent, entity))?;
            Ok(())
        })
        .await
    }

    async fn update_column(
        &self,
        id: ColumnId,
        changes: &ColumnChanges,
    ) -> BoardRepositoryResult<Option<Column>> {
        let changeset = ColumnChangeset {
            title: changes.title.as_ref().map(|title| title.as_str().to_owned()),
            position: changes.position.map(Position::value),
            updated_at: changes.updated_at,
        };
        self.run_blocking(move |connection| {
            let row = diesel::update(board_columns::table.find(id.into_inner()))
                .set(&changeset)
                .returning(ColumnRow::as_returning())
                .get_result::<ColumnRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            Ok(row.map(row_to_column))
        })
        .await
    }

    async fn delete_column(&self, id: ColumnId) -> BoardRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(board_columns::table.find(id.into_inner()))
                .execute(connection)
                .map_err(BoardRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        self.run_blocking(move |connection| {
            let row = board_columns::table
                .find(id.into_inner())
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            Ok(row.map(row_to_column))
        })
        .await
    }

    async fn columns_for_board(&self, board_id: BoardId) -> BoardRepositoryResult<Vec<Column>> {
        self.run_blocking(move |connection| {
            let rows = board_columns::table
                .filter(board_columns::board_id.eq(board_id.into_inner()))
                .order((
                    board_columns::position.asc(),
                    board_columns::created_at.asc(),
                    board_columns::id.asc(),
                ))
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_column).collect())
        })
        .await
    }

    async fn column_positions(&self, board_id: BoardId) -> BoardRepositoryResult<Vec<Position>> {
        self.run_blocking(move |connection| {
            let positions = board_columns::table
                .filter(board_columns::board_id.eq(board_id.into_inner()))
                .select(board_columns::position)
                .load::<i32>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            Ok(positions.into_iter().map(Position::new).collect())
        })
        .await
    }

    async fn insert_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let entity = EntityRef::Task(task.id());
        let parent = EntityRef::Column(task.column_id());
        let new_row = NewTaskRow {
            id: task.id().into_inner(),
            column_id: task.column_id().into_inner(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(|d| d.as_str().to_owned()),
            position: task.position().value(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_write_error(err, parent, entity))?;
            Ok(())
        })
        .await
    }

    async fn update_task(
        &self,
        id: TaskId,
        changes: &TaskChanges,
    ) -> BoardRepositoryResult<Option<Task>> {
        let entity = EntityRef::Task(id);
        let parent = changes.column_id.map_or(entity, EntityRef::Column);
        let changeset = TaskChangeset {
            title: changes.title.as_ref().map(|title| title.as_str().to_owned()),
            description: changes
                .description
                .as_ref()
                .map(|description| description.as_ref().map(|d| d.as_str().to_owned())),
            column_id: changes.column_id.map(ColumnId::into_inner),
            position: changes.position.map(Position::value),
            updated_at: changes.updated_at,
        };
        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(id.into_inner()))
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(|err| map_write_error(err, parent, entity))?;
            Ok(row.map(row_to_task))
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(BoardRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            Ok(row.map(row_to_task))
        })
        .await
    }

    async fn tasks_for_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::column_id.eq(column_id.into_inner()))
                .order((
                    tasks::position.asc(),
                    tasks::created_at.asc(),
                    tasks::id.asc(),
                ))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_task).collect())
        })
        .await
    }

    async fn task_positions(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Position>> {
        self.run_blocking(move |connection| {
            let positions = tasks::table
                .filter(tasks::column_id.eq(column_id.into_inner()))
                .select(tasks::position)
                .load::<i32>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            Ok(positions.into_iter().map(Position::new).collect())
        })
        .await
    }

    async fn count_tasks_in_column(&self, column_id: ColumnId) -> BoardRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count = tasks::table
                .filter(tasks::column_id.eq(column_id.into_inner()))
                .count()
                .get_result::<i64>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            u64::try_from(count).map_err(BoardRepositoryError::persistence)
        })
        .await
    }

    async fn search_tasks(&self, search: &TaskSearch) -> BoardRepositoryResult<Vec<Task>> {
        let pattern = search.like_pattern();
        let board_id = search.board_id().map(BoardId::into_inner);
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT t.id, t.column_id, t.title, t.description, t.position, t.created_at, ",
                "t.updated_at FROM tasks t ",
                "JOIN board_columns c ON c.id = t.column_id ",
                "WHERE (t.title ILIKE $1 ESCAPE '\\' OR t.description ILIKE $1 ESCAPE '\\') ",
                "AND ($2::uuid IS NULL OR c.board_id = $2) ",
                "ORDER BY t.created_at, t.id",
            ))
            .bind::<diesel::sql_types::Text, _>(pattern)
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Uuid>, _>(board_id)
            .load::<TaskRow>(connection)
            .map_err(BoardRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_task).collect())
        })
        .await
    }

    async fn task_counts_by_column(
        &self,
        board_id: BoardId,
    ) -> BoardRepositoryResult<HashMap<ColumnId, u64>> {
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT t.column_id, COUNT(*) AS task_count FROM tasks t ",
                "JOIN board_columns c ON c.id = t.column_id ",
                "WHERE c.board_id = $1 ",
                "GROUP BY t.column_id",
            ))
            .bind::<diesel::sql_types::Uuid, _>(board_id.into_inner())
            .load::<ColumnTaskCountRow>(connection)
            .map_err(BoardRepositoryError::persistence)?;

            rows.into_iter()
                .map(|row| {
                    let count =
                        u64::try_from(row.task_count).map_err(BoardRepositoryError::persistence)?;
                    Ok((ColumnId::from_uuid(row.column_id), count))
                })
                .collect()
        })
        .await
    }

    async fn oldest_task_created_at(
        &self,
        board_id: BoardId,
    ) -> BoardRepositoryResult<Option<DateTime<Utc>>> {
        self.run_blocking(move |connection| {
            let row = diesel::sql_query(concat!(
                "SELECT MIN(t.created_at) AS oldest FROM tasks t ",
                "JOIN board_columns c ON c.id = t.column_id ",
                "WHERE c.board_id = $1",
            ))
            .bind::<diesel::sql_types::Uuid, _>(board_id.into_inner())
            .get_result::<OldestTaskRow>(connection)
            .map_err(BoardRepositoryError::persistence)?;
            Ok(row.oldest)
        })
        .await
    }
}

/// Maps insert/update failures onto semantic repository errors.
///
/// `parent` is reported for foreign key violations, `entity` for unique
/// violations.
fn map_write_error(err: DieselError, parent: EntityRef, entity: EntityRef) -> BoardRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            BoardRepositoryError::MissingParent(parent)
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            BoardRepositoryError::Duplicate(entity)
        }
        _ => BoardRepositoryError::persistence(err),
    }
}

fn row_to_board(row: BoardRow) -> Board {
    Board::from_persisted(PersistedBoardData {
        id: BoardId::from_uuid(row.id),
        title: Title::from_persisted(row.title),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_column(row: ColumnRow) -> Column {
    Column::from_persisted(PersistedColumnData {
        id: ColumnId::from_uuid(row.id),
        board_id: BoardId::from_uuid(row.board_id),
        title: Title::from_persisted(row.title),
        position: Position::new(row.position),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_task(row: TaskRow) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        column_id: ColumnId::from_uuid(row.column_id),
        title: Title::from_persisted(row.title),
        description: row.description.and_then(Description::normalize),
        position: Position::new(row.position),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
