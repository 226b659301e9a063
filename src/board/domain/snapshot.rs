//! Materialized board views.

use super::{Board, Column, Task};
use serde::{Deserialize, Serialize};

/// A column together with its tasks in rank order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSnapshot {
    /// The column.
    pub column: Column,
    /// The column's tasks, sorted by rank.
    pub tasks: Vec<Task>,
}

/// A board with all of its columns and tasks in rank order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// The board.
    pub board: Board,
    /// The board's columns, sorted by rank.
    pub columns: Vec<ColumnSnapshot>,
}

impl BoardSnapshot {
    /// Returns the total number of tasks across all columns.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }
}
