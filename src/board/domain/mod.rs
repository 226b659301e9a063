//! Domain model for boards, columns, and tasks.
//!
//! The domain owns validation, position allocation, rank ordering, and the
//! statistics computation. Nothing here performs I/O.

mod board;
mod column;
mod error;
mod ids;
mod position;
mod search;
mod snapshot;
mod stats;
mod task;
mod text;
mod timestamp;

pub use board::{Board, BoardChanges, PersistedBoardData};
pub use column::{Column, ColumnChanges, PersistedColumnData};
pub use error::BoardDomainError;
pub use ids::{BoardId, ColumnId, EntityKind, EntityRef, TaskId};
pub use position::{
    Position, RankKey, Ranked, Renumbering, allocate_position, compact_positions, sort_by_rank,
};
pub use search::TaskSearch;
pub use snapshot::{BoardSnapshot, ColumnSnapshot};
pub use stats::{BoardStats, ColumnTaskCount};
pub use task::{PersistedTaskData, Task, TaskChanges};
pub use text::{Description, Title};
pub use timestamp::{TIMESTAMP_PRECISION_DIGITS, recorded_now};
