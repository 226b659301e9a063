//! In-memory integration tests for board, column, and task lifecycles.

use super::helpers::{Services, seed_board, services};
use kanban::board::{
    domain::{Description, EntityKind, Position},
    services::{BoardErrorKind, ColumnUpdate, CreateTaskRequest, TaskUpdate},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_board_removes_its_whole_hierarchy(services: Services) -> eyre::Result<()> {
    let seeded = seed_board(&services, "Doomed", &[("To Do", 2), ("Done", 1)]).await?;
    let survivor = seed_board(&services, "Survivor", &[("Inbox", 1)]).await?;

    services.collections.delete_board(seeded.board.id()).await?;

    for column in &seeded.columns {
        eyre::ensure!(
            services.collections.get_column(column.id()).await?.is_none(),
            "column {} should be gone",
            column.id()
        );
    }
    for task in &seeded.tasks {
        eyre::ensure!(
            services.collections.get_task(task.id()).await?.is_none(),
            "task {} should be gone",
            task.id()
        );
    }
    let boards = services.collections.list_boards().await?;
    eyre::ensure!(boards == vec![survivor.board], "only the survivor should remain");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updates_after_a_cascade_report_not_found(services: Services) -> eyre::Result<()> {
    let seeded = seed_board(&services, "Board", &[("To Do", 1)]).await?;
    let column = seeded
        .columns
        .first()
        .ok_or_else(|| eyre::eyre!("seeded column missing"))?;
    let task = seeded
        .tasks
        .first()
        .ok_or_else(|| eyre::eyre!("seeded task missing"))?;

    services.collections.delete_column(column.id()).await?;

    let column_update = services
        .collections
        .update_column(column.id(), ColumnUpdate::new().with_title("Back"))
        .await;
    let task_update = services
        .collections
        .update_task(task.id(), TaskUpdate::new().with_title("Back"))
        .await;
    let task_delete = services.collections.delete_task(task.id()).await;

    for (result, entity_kind) in [
        (column_update.map(drop), EntityKind::Column),
        (task_update.map(drop), EntityKind::Task),
        (task_delete, EntityKind::Task),
    ] {
        let err = result
            .err()
            .ok_or_else(|| eyre::eyre!("{entity_kind} operation should fail"))?;
        eyre::ensure!(
            err.kind() == BoardErrorKind::NotFound,
            "expected NotFound for {entity_kind}, got {err:?}"
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_fields_round_trip_through_updates(services: Services) -> eyre::Result<()> {
    let seeded = seed_board(&services, "Board", &[("To Do", 0)]).await?;
    let column = seeded
        .columns
        .first()
        .ok_or_else(|| eyre::eyre!("seeded column missing"))?;

    let created = services
        .collections
        .create_task(
            CreateTaskRequest::new(column.id(), "  Draft title ")
                .with_description("  first pass  ")
                .at_position(Position::new(9)),
        )
        .await?;
    eyre::ensure!(created.title().as_str() == "Draft title", "title should be trimmed");
    eyre::ensure!(
        created.description().map(Description::as_str) == Some("first pass"),
        "description should be trimmed"
    );
    eyre::ensure!(created.position() == Position::new(9), "position is verbatim");

    let updated = services
        .collections
        .update_task(
            created.id(),
            TaskUpdate::new()
                .with_title("Final title")
                .with_position(Position::new(2)),
        )
        .await?;
    let reread = services
        .collections
        .get_task(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;

    eyre::ensure!(reread == updated, "update result should match stored task");
    eyre::ensure!(reread.title().as_str() == "Final title", "title updated");
    eyre::ensure!(
        reread.description() == created.description(),
        "description left unchanged"
    );
    eyre::ensure!(reread.position() == Position::new(2), "position updated");
    eyre::ensure!(reread.column_id() == column.id(), "column unchanged");
    Ok(())
}
