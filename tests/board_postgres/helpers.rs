//! Shared helpers for `PostgreSQL` board integration tests.

use super::cluster::board_cluster;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use kanban::board::{
    adapters::postgres::{PostgresBoardRepository, SCHEMA_SQL, build_pool},
    services::{AggregateCalculator, MoveCoordinator, OrderedCollectionService},
};
use kanban::config::StoreConfig;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use rstest::fixture;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use uuid::Uuid;

/// Template database holding the board schema.
pub const TEMPLATE_DB: &str = "kanban_test_template";

/// Board services backed by a fresh database cloned from the template.
///
/// Fields drop in declaration order, so every pooled connection is closed
/// before the database itself is dropped.
pub struct PgBoard {
    runtime: Runtime,
    pub repository: Arc<PostgresBoardRepository>,
    pub collections: OrderedCollectionService<PostgresBoardRepository, DefaultClock>,
    pub mover: MoveCoordinator<PostgresBoardRepository, DefaultClock>,
    pub calculator: AggregateCalculator<PostgresBoardRepository, DefaultClock>,
    _database: DatabaseGuard,
}

impl PgBoard {
    /// Drives an async test body to completion.
    ///
    /// # Errors
    ///
    /// Returns whatever error the body returns.
    pub fn run<F>(&self, body: F) -> eyre::Result<()>
    where
        F: Future<Output = eyre::Result<()>>,
    {
        self.runtime.block_on(body)
    }
}

/// Drops a per-test database when the test finishes.
struct DatabaseGuard {
    cluster: &'static TestCluster,
    name: String,
}

impl Drop for DatabaseGuard {
    #[expect(
        clippy::print_stderr,
        reason = "Test cleanup warnings are informational"
    )]
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.name.as_str()) {
            eprintln!("warning: failed to drop test database {}: {err}", self.name);
        }
    }
}

/// Ensures the template database exists with the board schema applied.
///
/// # Errors
///
/// Returns an error if the template cannot be created or migrated.
pub fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(SCHEMA_SQL)
                .map_err(|e| eyre::eyre!("schema failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("template setup failed: {e}"))
}

/// Provides board services over a database of their own.
///
/// # Errors
///
/// Returns an error if the database, pool, or runtime cannot be created.
#[fixture]
pub fn pg_board(board_cluster: &'static TestCluster) -> eyre::Result<PgBoard> {
    ensure_template(board_cluster)?;
    let name = format!("kanban_test_{}", Uuid::now_v7().simple());
    board_cluster
        .create_database_from_template(name.as_str(), TEMPLATE_DB)
        .map_err(|e| eyre::eyre!("failed to create {name}: {e}"))?;
    let database = DatabaseGuard {
        cluster: board_cluster,
        name,
    };

    let config = StoreConfig::new(board_cluster.connection().database_url(&database.name))
        .with_pool_max_size(2)
        .with_pool_timeout(Duration::from_secs(10));
    let repository = Arc::new(PostgresBoardRepository::new(build_pool(&config)?));
    let runtime = Builder::new_current_thread().enable_all().build()?;

    let clock = Arc::new(DefaultClock);
    Ok(PgBoard {
        runtime,
        collections: OrderedCollectionService::new(Arc::clone(&repository), Arc::clone(&clock)),
        mover: MoveCoordinator::new(Arc::clone(&repository), Arc::clone(&clock)),
        calculator: AggregateCalculator::new(Arc::clone(&repository), clock),
        repository,
        _database: database,
    })
}
