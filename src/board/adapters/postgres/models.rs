//! Diesel row models for board persistence.

use super::schema::{board_columns, boards, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for boards.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Board title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for boards.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = boards)]
pub struct NewBoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Board title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model for boards.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = boards)]
pub struct BoardChangeset {
    /// Replacement title.
    pub title: String,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for columns.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = board_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Owning board.
    pub board_id: uuid::Uuid,
    /// Column title.
    pub title: String,
    /// Position among the board's columns.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for columns.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_columns)]
pub struct NewColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Owning board.
    pub board_id: uuid::Uuid,
    /// Column title.
    pub title: String,
    /// Position among the board's columns.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update model for columns; `None` fields are skipped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = board_columns)]
pub struct ColumnChangeset {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement position.
    pub position: Option<i32>,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for tasks.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Owning column.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub column_id: uuid::Uuid,
    /// Task title.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub title: String,
    /// Optional description.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub description: Option<String>,
    /// Position among the column's tasks.
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub position: i32,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning column.
    pub column_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Position among the column's tasks.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update model for tasks; `None` fields are skipped.
///
/// `Some(None)` for `description` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement or cleared description.
    pub description: Option<Option<String>>,
    /// Replacement owning column.
    pub column_id: Option<uuid::Uuid>,
    /// Replacement position.
    pub position: Option<i32>,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Grouped task count for one column.
#[derive(Debug, Clone, QueryableByName)]
pub struct ColumnTaskCountRow {
    /// Counted column.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub column_id: uuid::Uuid,
    /// Number of tasks in the column.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub task_count: i64,
}

/// Minimum task creation time across a board.
#[derive(Debug, Clone, QueryableByName)]
pub struct OldestTaskRow {
    /// Earliest creation timestamp, `NULL` when the board has no tasks.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub oldest: Option<DateTime<Utc>>,
}
