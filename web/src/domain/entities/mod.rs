//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the document shapes used by the store adapters.

pub mod pitch;

pub use pitch::{slugify, NewPitch, Pitch, PitchId, PitchQuery};
