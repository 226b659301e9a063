//! In-memory integration tests for board statistics.

use super::helpers::{Services, seed_board, services};
use kanban::board::services::BoardErrorKind;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stats_cover_every_column_in_board_order(services: Services) -> eyre::Result<()> {
    let seeded = seed_board(&services, "Board", &[("To Do", 3), ("Doing", 0), ("Done", 5)]).await?;

    let stats = services.calculator.board_stats(seeded.board.id()).await?;

    let entries: Vec<(&str, u64)> = stats
        .tasks_by_column
        .iter()
        .map(|entry| (entry.column_title.as_str(), entry.count))
        .collect();
    eyre::ensure!(stats.total_tasks == 8, "expected 8 tasks, got {}", stats.total_tasks);
    eyre::ensure!(
        entries == vec![("To Do", 3), ("Doing", 0), ("Done", 5)],
        "unexpected entries {entries:?}"
    );
    eyre::ensure!(
        stats.average_tasks_per_column > 2.66 && stats.average_tasks_per_column < 2.67,
        "unexpected average {}",
        stats.average_tasks_per_column
    );
    eyre::ensure!(
        stats.oldest_task_age_minutes == Some(0),
        "freshly created tasks should be under a minute old"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stats_for_empty_board_are_zeroed(services: Services) -> eyre::Result<()> {
    let seeded = seed_board(&services, "Empty", &[]).await?;

    let stats = services.calculator.board_stats(seeded.board.id()).await?;

    eyre::ensure!(stats.total_tasks == 0, "no tasks expected");
    eyre::ensure!(stats.tasks_by_column.is_empty(), "no columns expected");
    eyre::ensure!(
        stats.average_tasks_per_column.total_cmp(&0.0).is_eq(),
        "average should be zero"
    );
    eyre::ensure!(stats.oldest_task_age_minutes.is_none(), "no age expected");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stats_follow_deletes_and_moves(services: Services) -> eyre::Result<()> {
    let seeded = seed_board(&services, "Board", &[("To Do", 2), ("Done", 0)]).await?;
    let done = seeded
        .columns
        .last()
        .ok_or_else(|| eyre::eyre!("seeded column missing"))?;
    let (first, second) = match seeded.tasks.as_slice() {
        [first, second] => (first, second),
        _ => eyre::bail!("expected two seeded tasks"),
    };

    services
        .mover
        .move_task(first.id(), done.id(), kanban::board::domain::Position::FIRST)
        .await?;
    services.collections.delete_task(second.id()).await?;
    let stats = services.calculator.board_stats(seeded.board.id()).await?;

    let counts: Vec<u64> = stats.tasks_by_column.iter().map(|entry| entry.count).collect();
    eyre::ensure!(counts == vec![0, 1], "unexpected counts {counts:?}");
    eyre::ensure!(stats.total_tasks == 1, "one task should remain");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stats_for_deleted_board_are_not_found(services: Services) -> eyre::Result<()> {
    let seeded = seed_board(&services, "Gone", &[("To Do", 1)]).await?;
    services.collections.delete_board(seeded.board.id()).await?;

    let result = services.calculator.board_stats(seeded.board.id()).await;

    let err = result
        .err()
        .ok_or_else(|| eyre::eyre!("stats for a deleted board should fail"))?;
    eyre::ensure!(err.kind() == BoardErrorKind::NotFound, "expected NotFound, got {err:?}");
    Ok(())
}
