//! Seeds a demonstration board.
//!
//! Usage:
//!
//! ```text
//! seed_board [--memory]
//! ```
//!
//! Without arguments the board is written to the `PostgreSQL` database named
//! by `KANBAN_DATABASE_URL`, creating the tables first when needed. With
//! `--memory` the board is built in an in-memory repository instead. Either
//! way the resulting snapshot and statistics are logged as JSON.
//!
//! Logging honours `RUST_LOG` and defaults to `info`.

use kanban::board::{
    adapters::{
        TracingBoardObserver,
        memory::InMemoryBoardRepository,
        postgres::{PostgresBoardRepository, build_pool},
    },
    ports::{BoardRepository, BoardRepositoryError},
    services::{
        AggregateCalculator, BoardServiceError, CreateColumnRequest, CreateTaskRequest,
        OrderedCollectionService,
    },
};
use kanban::config::{ConfigError, StoreConfig};
use mockable::DefaultClock;
use std::env;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::info;
use tracing_subscriber::EnvFilter;

const BOARD_TITLE: &str = "AI Gateway";

const LAYOUT: &[(&str, &[(&str, Option<&str>)])] = &[
    (
        "Backlog",
        &[
            ("Rate limiting per tenant", Some("Token bucket keyed by API key")),
            ("Audit log export", None),
        ],
    ),
    (
        "To Do",
        &[(
            "Streaming responses",
            Some("Forward server-sent events without buffering"),
        )],
    ),
    (
        "In Progress",
        &[("Provider failover", Some("Retry on the secondary provider"))],
    ),
    ("Review", &[("Request tracing", None)]),
    ("Done", &[("Authentication middleware", Some("OAuth bearer tokens"))]),
];

#[derive(Debug, Error)]
enum SeedError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
    #[error(transparent)]
    Service(#[from] BoardServiceError),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("seeded board disappeared before it could be read back")]
    Vanished,
}

fn main() -> Result<(), SeedError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let in_memory = match env::args().nth(1).as_deref() {
        None => false,
        Some("--memory") => true,
        Some(other) => return Err(SeedError::InvalidArgs(format!("unknown argument {other}"))),
    };

    let runtime = Builder::new_multi_thread().enable_all().build()?;
    if in_memory {
        return runtime.block_on(seed(Arc::new(InMemoryBoardRepository::new())));
    }

    let config = StoreConfig::from_env()?;
    info!(?config, "connecting to board store");
    runtime.block_on(async {
        let pool = tokio::task::spawn_blocking(move || build_pool(&config))
            .await
            .map_err(BoardRepositoryError::persistence)??;
        let repository = Arc::new(PostgresBoardRepository::new(pool));
        repository.apply_schema().await?;
        seed(repository).await
    })
}

async fn seed<R>(repository: Arc<R>) -> Result<(), SeedError>
where
    R: BoardRepository,
{
    let clock = Arc::new(DefaultClock);
    let collections = OrderedCollectionService::new(Arc::clone(&repository), Arc::clone(&clock))
        .with_observer(Arc::new(TracingBoardObserver::new()));
    let calculator = AggregateCalculator::new(repository, clock);

    let board = collections.create_board(BOARD_TITLE).await?;
    for (column_title, tasks) in LAYOUT {
        let column = collections
            .create_column(CreateColumnRequest::new(board.id(), *column_title))
            .await?;
        for (task_title, description) in *tasks {
            let mut request = CreateTaskRequest::new(column.id(), *task_title);
            if let Some(text) = description {
                request = request.with_description(*text);
            }
            collections.create_task(request).await?;
        }
    }

    let snapshot = collections
        .board_snapshot(board.id())
        .await?
        .ok_or(SeedError::Vanished)?;
    let stats = calculator.board_stats(board.id()).await?;
    info!(
        board_id = %board.id(),
        tasks = snapshot.task_count(),
        snapshot = %serde_json::to_string(&snapshot)?,
        stats = %serde_json::to_string(&stats)?,
        "seeded board"
    );
    Ok(())
}
