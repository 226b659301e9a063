//! Application services for board collections, moves, and statistics.

mod collection;
mod error;
mod movement;
mod stats;

pub use collection::{
    ColumnUpdate, CreateColumnRequest, CreateTaskRequest, OrderedCollectionService, TaskUpdate,
};
pub use error::{BoardErrorKind, BoardServiceError, BoardServiceResult};
pub use movement::MoveCoordinator;
pub use stats::AggregateCalculator;
