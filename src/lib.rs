//! Kanban: ordered boards, columns, and tasks.
//!
//! This crate provides the storage-agnostic core of a kanban board: position
//! allocation for new columns and tasks, ordered collection reads, atomic
//! task moves between columns, and aggregate board statistics.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and observability
//! - **Adapters**: In-memory, `PostgreSQL`, and `tracing` implementations
//!
//! # Modules
//!
//! - [`board`]: Board, column, and task management
//! - [`config`]: Environment-driven store configuration

pub mod board;
pub mod config;
