//! Service-level errors shared by the board services.

use crate::board::{
    domain::{BoardDomainError, EntityRef},
    ports::BoardRepositoryError,
};
use thiserror::Error;

/// Errors returned by board service operations.
#[derive(Debug, Clone, Error)]
pub enum BoardServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// The entity targeted by the operation does not exist.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// The operation references another entity that does not exist, such as
    /// the target column of a move.
    #[error("referenced {0} does not exist")]
    DanglingReference(EntityRef),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
}

/// Coarse classification of [`BoardServiceError`] for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardErrorKind {
    /// A target identifier does not resolve.
    NotFound,
    /// Caller input was rejected.
    InvalidArgument,
    /// The storage collaborator failed.
    Storage,
}

impl BoardServiceError {
    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> BoardErrorKind {
        match self {
            Self::NotFound(_) | Self::Repository(BoardRepositoryError::MissingParent(_)) => {
                BoardErrorKind::NotFound
            }
            Self::Domain(_) | Self::DanglingReference(_) => BoardErrorKind::InvalidArgument,
            Self::Repository(_) => BoardErrorKind::Storage,
        }
    }

    /// Maps a repository error raised while creating a child entity.
    ///
    /// A missing parent becomes [`BoardServiceError::NotFound`].
    pub(crate) fn on_create(err: BoardRepositoryError) -> Self {
        match err {
            BoardRepositoryError::MissingParent(parent) => Self::NotFound(parent),
            other => Self::Repository(other),
        }
    }

    /// Maps a repository error raised while reassigning an entity.
    ///
    /// A missing parent becomes [`BoardServiceError::DanglingReference`].
    pub(crate) fn on_relocate(err: BoardRepositoryError) -> Self {
        match err {
            BoardRepositoryError::MissingParent(parent) => Self::DanglingReference(parent),
            other => Self::Repository(other),
        }
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;
