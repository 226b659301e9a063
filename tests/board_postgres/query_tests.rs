//! `PostgreSQL` ordering, search, and aggregate query tests.

use super::helpers::{PgBoard, pg_board};
use kanban::board::{
    domain::Position,
    services::{CreateColumnRequest, CreateTaskRequest},
};
use rstest::rstest;

#[rstest]
fn listing_uses_position_then_creation_order(pg_board: eyre::Result<PgBoard>) -> eyre::Result<()> {
    let pg = pg_board?;
    pg.run(async {
        let board = pg.collections.create_board("Ordering").await?;
        for (title, position) in [("Later", 5), ("First", 0), ("Tie A", 2), ("Tie B", 2)] {
            pg.collections
                .create_column(
                    CreateColumnRequest::new(board.id(), title)
                        .at_position(Position::new(position)),
                )
                .await?;
        }
        let appended = pg
            .collections
            .create_column(CreateColumnRequest::new(board.id(), "Appended"))
            .await?;

        let listed = pg.collections.list_columns(board.id()).await?;
        let titles: Vec<&str> = listed.iter().map(|column| column.title().as_str()).collect();

        eyre::ensure!(appended.position() == Position::new(6), "append after maximum");
        eyre::ensure!(
            titles == vec!["First", "Tie A", "Tie B", "Later", "Appended"],
            "unexpected order {titles:?}"
        );

        pg.collections.delete_board(board.id()).await?;
        Ok(())
    })
}

#[rstest]
fn search_is_scoped_case_insensitive_and_literal(
    pg_board: eyre::Result<PgBoard>,
) -> eyre::Result<()> {
    let pg = pg_board?;
    pg.run(async {
        let board = pg.collections.create_board("Search").await?;
        let column = pg
            .collections
            .create_column(CreateColumnRequest::new(board.id(), "To Do"))
            .await?;
        let other = pg.collections.create_board("Search elsewhere").await?;
        let other_column = pg
            .collections
            .create_column(CreateColumnRequest::new(other.id(), "To Do"))
            .await?;

        let title_hit = pg
            .collections
            .create_task(CreateTaskRequest::new(column.id(), "Fix AUTH_flow"))
            .await?;
        let description_hit = pg
            .collections
            .create_task(
                CreateTaskRequest::new(column.id(), "Login").with_description("oauth_flow token"),
            )
            .await?;
        pg.collections
            .create_task(CreateTaskRequest::new(column.id(), "authXflow decoy"))
            .await?;
        pg.collections
            .create_task(CreateTaskRequest::new(other_column.id(), "auth_flow elsewhere"))
            .await?;

        let hits = pg
            .collections
            .search_tasks("Auth_Flow", Some(board.id()))
            .await?;
        let hit_ids: Vec<_> = hits.iter().map(|task| task.id()).collect();

        eyre::ensure!(
            hit_ids == vec![title_hit.id(), description_hit.id()],
            "unexpected hits {hit_ids:?}"
        );

        pg.collections.delete_board(board.id()).await?;
        pg.collections.delete_board(other.id()).await?;
        Ok(())
    })
}

#[rstest]
fn stats_use_grouped_counts(pg_board: eyre::Result<PgBoard>) -> eyre::Result<()> {
    let pg = pg_board?;
    pg.run(async {
        let board = pg.collections.create_board("Stats").await?;
        for (title, count) in [("To Do", 3_usize), ("Doing", 0), ("Done", 5)] {
            let column = pg
                .collections
                .create_column(CreateColumnRequest::new(board.id(), title))
                .await?;
            for index in 0..count {
                pg.collections
                    .create_task(CreateTaskRequest::new(column.id(), format!("{title} {index}")))
                    .await?;
            }
        }

        let stats = pg.calculator.board_stats(board.id()).await?;
        let counts: Vec<u64> = stats.tasks_by_column.iter().map(|entry| entry.count).collect();

        eyre::ensure!(stats.total_tasks == 8, "expected 8 tasks");
        eyre::ensure!(counts == vec![3, 0, 5], "unexpected counts {counts:?}");
        eyre::ensure!(stats.oldest_task_age_minutes.is_some(), "age expected");

        pg.collections.delete_board(board.id()).await?;
        Ok(())
    })
}

#[rstest]
fn repair_renumbers_tasks_in_postgres(pg_board: eyre::Result<PgBoard>) -> eyre::Result<()> {
    let pg = pg_board?;
    pg.run(async {
        let board = pg.collections.create_board("Repair").await?;
        let column = pg
            .collections
            .create_column(CreateColumnRequest::new(board.id(), "To Do"))
            .await?;
        for position in [10, 20, 30] {
            pg.collections
                .create_task(
                    CreateTaskRequest::new(column.id(), format!("at {position}"))
                        .at_position(Position::new(position)),
                )
                .await?;
        }

        let repaired = pg.collections.repair_task_positions(column.id()).await?;
        let positions: Vec<i32> = repaired.iter().map(|task| task.position().value()).collect();

        eyre::ensure!(positions == vec![0, 1, 2], "unexpected positions {positions:?}");
        let moved = pg
            .mover
            .move_task(
                repaired
                    .first()
                    .ok_or_else(|| eyre::eyre!("repaired task missing"))?
                    .id(),
                column.id(),
                Position::new(9),
            )
            .await?;
        eyre::ensure!(moved.position() == Position::new(9), "move within column");

        pg.collections.delete_board(board.id()).await?;
        Ok(())
    })
}
