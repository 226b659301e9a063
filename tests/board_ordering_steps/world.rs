//! Shared world state for ordered board collection BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use kanban::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Board, BoardStats, Column, Task},
    services::{
        AggregateCalculator, BoardServiceError, MoveCoordinator, OrderedCollectionService,
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for ordered board collection behaviour tests.
pub struct BoardWorld {
    pub collections: OrderedCollectionService<InMemoryBoardRepository, DefaultClock>,
    pub mover: MoveCoordinator<InMemoryBoardRepository, DefaultClock>,
    pub calculator: AggregateCalculator<InMemoryBoardRepository, DefaultClock>,
    pub board: Option<Board>,
    pub columns: HashMap<String, Column>,
    pub tasks: HashMap<String, Task>,
    pub stats: Option<BoardStats>,
    pub last_error: Option<BoardServiceError>,
}

impl BoardWorld {
    /// Creates a world over an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryBoardRepository::new());
        let clock = Arc::new(DefaultClock);
        Self {
            collections: OrderedCollectionService::new(
                Arc::clone(&repository),
                Arc::clone(&clock),
            ),
            mover: MoveCoordinator::new(Arc::clone(&repository), Arc::clone(&clock)),
            calculator: AggregateCalculator::new(repository, clock),
            board: None,
            columns: HashMap::new(),
            tasks: HashMap::new(),
            stats: None,
            last_error: None,
        }
    }

    /// Returns the scenario board.
    ///
    /// # Errors
    ///
    /// Returns an error if no board has been created yet.
    pub fn board(&self) -> Result<&Board, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))
    }

    /// Returns a column created earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no column has the given title.
    pub fn column(&self, title: &str) -> Result<&Column, eyre::Report> {
        self.columns
            .get(title)
            .ok_or_else(|| eyre::eyre!("unknown column {title:?} in scenario world"))
    }

    /// Returns a task created earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has the given title.
    pub fn task(&self, title: &str) -> Result<&Task, eyre::Report> {
        self.tasks
            .get(title)
            .ok_or_else(|| eyre::eyre!("unknown task {title:?} in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
