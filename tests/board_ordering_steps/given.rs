//! Given steps for ordered board collection BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use kanban::board::{
    domain::Position,
    services::{CreateColumnRequest, CreateTaskRequest},
};
use rstest_bdd_macros::given;

#[given(r#"a board titled "{title}""#)]
fn board_titled(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let board = run_async(world.collections.create_board(&title)).wrap_err("create board")?;
    world.board = Some(board);
    Ok(())
}

#[given(r#"a column "{title}" at position {position:i32}"#)]
fn column_at_position(
    world: &mut BoardWorld,
    title: String,
    position: i32,
) -> Result<(), eyre::Report> {
    let board_id = world.board()?.id();
    let request =
        CreateColumnRequest::new(board_id, title.as_str()).at_position(Position::new(position));
    let column = run_async(world.collections.create_column(request)).wrap_err("create column")?;
    world.columns.insert(title, column);
    Ok(())
}

#[given(r#"a task "{title}" in column "{column}""#)]
fn task_in_column(
    world: &mut BoardWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let column_id = world.column(&column)?.id();
    let task = run_async(
        world
            .collections
            .create_task(CreateTaskRequest::new(column_id, title.as_str())),
    )
    .wrap_err("create task")?;
    world.tasks.insert(title, task);
    Ok(())
}

#[given(r#"column "{column}" has {count:u64} tasks"#)]
fn column_has_tasks(
    world: &mut BoardWorld,
    column: String,
    count: u64,
) -> Result<(), eyre::Report> {
    let column_id = world.column(&column)?.id();
    for index in 0..count {
        run_async(
            world
                .collections
                .create_task(CreateTaskRequest::new(column_id, format!("{column} #{index}"))),
        )
        .wrap_err("create seeded task")?;
    }
    Ok(())
}
