//! Read-only board statistics.

use super::error::{BoardServiceError, BoardServiceResult};
use crate::board::{
    domain::{BoardId, BoardStats, EntityRef, sort_by_rank},
    ports::BoardRepository,
};
use mockable::Clock;
use std::sync::Arc;

/// Computes board statistics from storage aggregates.
///
/// Counts come from one grouped query and the oldest task from one minimum
/// query; tasks are never loaded individually.
pub struct AggregateCalculator<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for AggregateCalculator<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> AggregateCalculator<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new calculator.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Computes statistics for a board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`] for an unknown board.
    pub async fn board_stats(&self, board_id: BoardId) -> BoardServiceResult<BoardStats> {
        if self.repository.find_board(board_id).await?.is_none() {
            return Err(BoardServiceError::NotFound(EntityRef::Board(board_id)));
        }
        let mut columns = self.repository.columns_for_board(board_id).await?;
        sort_by_rank(&mut columns);
        let counts = self.repository.task_counts_by_column(board_id).await?;
        let oldest = self.repository.oldest_task_created_at(board_id).await?;

        Ok(BoardStats::compute(
            board_id,
            &columns,
            &counts,
            oldest,
            self.clock.utc(),
        ))
    }
}
