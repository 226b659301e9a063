//! Read-only board statistics.

use super::{BoardId, Column, ColumnId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Live task count of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTaskCount {
    /// Counted column.
    pub column_id: ColumnId,
    /// Column title at computation time.
    pub column_title: String,
    /// Number of tasks in the column.
    pub count: u64,
}

/// Aggregate statistics for a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardStats {
    /// Board the statistics describe.
    pub board_id: BoardId,
    /// Sum of all column counts.
    pub total_tasks: u64,
    /// One entry per column, in board column order.
    pub tasks_by_column: Vec<ColumnTaskCount>,
    /// `total_tasks / columns`, or `0.0` for a board without columns.
    pub average_tasks_per_column: f64,
    /// Whole minutes since the oldest task was created, `None` without tasks.
    pub oldest_task_age_minutes: Option<u64>,
}

impl BoardStats {
    /// Derives statistics from aggregate inputs.
    ///
    /// `ordered_columns` must already be in rank order. Columns missing from
    /// `counts` have no tasks. The oldest-task age is rounded down and never
    /// negative, even if `now` precedes `oldest_task_created_at`.
    #[must_use]
    pub fn compute<S: std::hash::BuildHasher>(
        board_id: BoardId,
        ordered_columns: &[Column],
        counts: &HashMap<ColumnId, u64, S>,
        oldest_task_created_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let tasks_by_column: Vec<ColumnTaskCount> = ordered_columns
            .iter()
            .map(|column| ColumnTaskCount {
                column_id: column.id(),
                column_title: column.title().as_str().to_owned(),
                count: counts.get(&column.id()).copied().unwrap_or_default(),
            })
            .collect();
        let total_tasks = tasks_by_column.iter().map(|entry| entry.count).sum();
        let average_tasks_per_column = average(total_tasks, tasks_by_column.len());
        let oldest_task_age_minutes = oldest_task_created_at
            .map(|oldest| u64::try_from((now - oldest).num_minutes()).unwrap_or_default());

        Self {
            board_id,
            total_tasks,
            tasks_by_column,
            average_tasks_per_column,
            oldest_task_age_minutes,
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "average is reported as a float; counts far below 2^52 are exact"
)]
fn average(total: u64, columns: usize) -> f64 {
    if columns == 0 {
        return 0.0;
    }
    total as f64 / columns as f64
}
