//! Test utilities
//!
//! Test fixtures shared by unit tests. The in-memory repository in
//! `adapters::memory` doubles as the happy-path test store; failing stores are
//! built with the mockall-generated `MockPitchRepository`.

pub mod fixtures;

pub use fixtures::*;
