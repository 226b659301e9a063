//! When steps for ordered board collection BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use kanban::board::{
    domain::{ColumnId, Position},
    services::CreateColumnRequest,
};
use rstest_bdd_macros::when;

#[when(r#"a column "{title}" is appended"#)]
fn column_appended(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let board_id = world.board()?.id();
    let column = run_async(
        world
            .collections
            .create_column(CreateColumnRequest::new(board_id, title.as_str())),
    )
    .wrap_err("append column")?;
    world.columns.insert(title, column);
    Ok(())
}

#[when(r#"a column "{title}" is placed at position {position:i32}"#)]
fn column_placed(
    world: &mut BoardWorld,
    title: String,
    position: i32,
) -> Result<(), eyre::Report> {
    let board_id = world.board()?.id();
    let request =
        CreateColumnRequest::new(board_id, title.as_str()).at_position(Position::new(position));
    let column = run_async(world.collections.create_column(request)).wrap_err("place column")?;
    world.columns.insert(title, column);
    Ok(())
}

#[when(r#"task "{title}" is moved to column "{column}" at position {position:i32}"#)]
fn task_moved(
    world: &mut BoardWorld,
    title: String,
    column: String,
    position: i32,
) -> Result<(), eyre::Report> {
    let task_id = world.task(&title)?.id();
    let column_id = world.column(&column)?.id();
    let moved = run_async(
        world
            .mover
            .move_task(task_id, column_id, Position::new(position)),
    )
    .wrap_err("move task")?;
    world.tasks.insert(title, moved);
    Ok(())
}

#[when(r#"task "{title}" is moved to a missing column"#)]
fn task_moved_to_missing_column(
    world: &mut BoardWorld,
    title: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task(&title)?.id();
    let result = run_async(
        world
            .mover
            .move_task(task_id, ColumnId::new(), Position::FIRST),
    );
    world.last_error = result.err();
    Ok(())
}

#[when("the board statistics are computed")]
fn statistics_computed(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let board_id = world.board()?.id();
    let stats =
        run_async(world.calculator.board_stats(board_id)).wrap_err("compute board stats")?;
    world.stats = Some(stats);
    Ok(())
}

#[when("a board with a blank title is created")]
fn blank_board_created(world: &mut BoardWorld) {
    let result = run_async(world.collections.create_board("   "));
    world.last_error = result.err();
}
