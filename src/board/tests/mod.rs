//! Unit tests for board management.

mod support;
