//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod memory;
pub mod sanity;

pub use memory::InMemoryPitchRepository;
pub use sanity::{SanityClient, SanityPitchRepository};
