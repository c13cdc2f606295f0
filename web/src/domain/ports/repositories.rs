//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., the Sanity content lake).

use async_trait::async_trait;

use crate::domain::entities::{NewPitch, Pitch, PitchId, PitchQuery};
use crate::error::DomainError;

/// Repository for Pitch entities
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PitchRepository: Send + Sync {
    /// Create a new pitch
    async fn create(&self, pitch: &NewPitch) -> Result<Pitch, DomainError>;

    /// Find a pitch by ID
    async fn find_by_id(&self, id: &PitchId) -> Result<Option<Pitch>, DomainError>;

    /// Read the view counter, bypassing any read cache.
    ///
    /// `None` when the pitch does not exist, `Some(0)` when it was never viewed.
    async fn find_views(&self, id: &PitchId) -> Result<Option<i64>, DomainError>;

    /// Add one to the view counter
    async fn increment_views(&self, id: &PitchId) -> Result<(), DomainError>;

    /// List pitches newest first, optionally filtered by title or category
    async fn list(&self, query: &PitchQuery) -> Result<Vec<Pitch>, DomainError>;
}
