//! Adapter implementations for board ports.

pub mod memory;
pub mod postgres;

mod tracing_observer;

pub use tracing_observer::TracingBoardObserver;
