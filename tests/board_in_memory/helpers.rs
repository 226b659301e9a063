//! Shared helpers for in-memory board integration tests.

use kanban::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Board, Column, Task},
    services::{
        AggregateCalculator, CreateColumnRequest, CreateTaskRequest, MoveCoordinator,
        OrderedCollectionService,
    },
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Board services sharing one in-memory repository.
pub struct Services {
    pub collections: OrderedCollectionService<InMemoryBoardRepository, DefaultClock>,
    pub mover: MoveCoordinator<InMemoryBoardRepository, DefaultClock>,
    pub calculator: AggregateCalculator<InMemoryBoardRepository, DefaultClock>,
}

/// Provides services over a fresh in-memory repository.
#[fixture]
pub fn services() -> Services {
    let repository = Arc::new(InMemoryBoardRepository::new());
    let clock = Arc::new(DefaultClock);
    Services {
        collections: OrderedCollectionService::new(Arc::clone(&repository), Arc::clone(&clock)),
        mover: MoveCoordinator::new(Arc::clone(&repository), Arc::clone(&clock)),
        calculator: AggregateCalculator::new(repository, clock),
    }
}

/// A board with appended columns, each holding the given number of tasks.
pub struct SeededBoard {
    pub board: Board,
    pub columns: Vec<Column>,
    pub tasks: Vec<Task>,
}

/// Creates a board whose columns are appended in the given order.
///
/// # Errors
///
/// Returns an error if any create operation fails.
pub async fn seed_board(
    services: &Services,
    title: &str,
    layout: &[(&str, usize)],
) -> eyre::Result<SeededBoard> {
    let board = services.collections.create_board(title).await?;
    let mut columns = Vec::with_capacity(layout.len());
    let mut tasks = Vec::new();
    for (column_title, task_count) in layout {
        let column = services
            .collections
            .create_column(CreateColumnRequest::new(board.id(), *column_title))
            .await?;
        for index in 0..*task_count {
            let task = services
                .collections
                .create_task(CreateTaskRequest::new(
                    column.id(),
                    format!("{column_title} #{index}"),
                ))
                .await?;
            tasks.push(task);
        }
        columns.push(column);
    }
    Ok(SeededBoard {
        board,
        columns,
        tasks,
    })
}
