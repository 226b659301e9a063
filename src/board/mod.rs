//! Hierarchical board management: boards own columns, columns own tasks.
//!
//! Columns and tasks carry an integer position among their siblings. New
//! siblings are appended after the current maximum unless a position is
//! requested, and reads order siblings by position with a deterministic
//! tie-break on creation time and identifier. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
