//! Port contracts for board management.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod observer;
pub mod repository;

pub use observer::{BoardEvent, BoardObserver, NoopBoardObserver};
pub use repository::{BoardRepository, BoardRepositoryError, BoardRepositoryResult};
