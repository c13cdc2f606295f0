//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod pitch_service;
pub mod validation;

pub use pitch_service::{ActionState, PitchService, SubmitError};
pub use validation::{FieldErrors, PitchForm};
