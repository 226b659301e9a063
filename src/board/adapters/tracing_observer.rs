//! Observer adapter that emits board events through `tracing`.

use crate::board::ports::{BoardEvent, BoardObserver};
use tracing::info;

/// Logs every board mutation as a structured `tracing` event.
///
/// Events are emitted at `INFO` under the `kanban::board` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBoardObserver;

impl TracingBoardObserver {
    /// Creates a tracing observer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BoardObserver for TracingBoardObserver {
    fn record(&self, event: &BoardEvent) {
        let name = event.name();
        match event {
            BoardEvent::BoardCreated { board_id } => {
                info!(target: "kanban::board", event = name, %board_id, "board created");
            }
            BoardEvent::ColumnCreated {
                column_id,
                board_id,
                position,
            } => {
                info!(
                    target: "kanban::board",
                    event = name,
                    %column_id,
                    %board_id,
                    position = position.value(),
                    "column created"
                );
            }
            BoardEvent::TaskCreated {
                task_id,
                column_id,
                position,
            } => {
                info!(
                    target: "kanban::board",
                    event = name,
                    %task_id,
                    %column_id,
                    position = position.value(),
                    "task created"
                );
            }
            BoardEvent::Updated { entity } => {
                info!(target: "kanban::board", event = name, %entity, "entity updated");
            }
            BoardEvent::TaskMoved {
                task_id,
                column_id,
                position,
            } => {
                info!(
                    target: "kanban::board",
                    event = name,
                    %task_id,
                    %column_id,
                    position = position.value(),
                    "task moved"
                );
            }
            BoardEvent::Deleted { entity } => {
                info!(target: "kanban::board", event = name, %entity, "entity deleted");
            }
            BoardEvent::PositionsCompacted {
                kind,
                parent,
                renumbered,
            } => {
                info!(
                    target: "kanban::board",
                    event = name,
                    %kind,
                    %parent,
                    renumbered = *renumbered,
                    "positions compacted"
                );
            }
        }
    }
}
