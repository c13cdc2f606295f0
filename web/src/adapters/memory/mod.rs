//! In-memory adapters
//!
//! Process-local implementations used for local development and tests.

pub mod pitch_repo;

pub use pitch_repo::InMemoryPitchRepository;
