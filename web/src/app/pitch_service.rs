//! Pitch service
//!
//! Orchestrates submission (validate, then create) and the view counter
//! (fresh read, then increment) on top of a `PitchRepository`.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::validation::{validate_pitch, FieldErrors, PitchForm};
use crate::domain::entities::{Pitch, PitchId, PitchQuery};
use crate::domain::ports::PitchRepository;
use crate::error::DomainError;

/// Why a submission did not produce a pitch
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("unexpected error: {0}")]
    Unexpected(#[from] DomainError),
}

/// Lifecycle of a submission as seen by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionStatus {
    Success,
    Error,
}

/// Result of a submission, returned to the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionState {
    pub status: ActionStatus,
    pub error: String,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "fieldErrors", skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

impl ActionState {
    pub const VALIDATION_FAILED: &'static str = "validation failed";
    pub const UNEXPECTED: &'static str = "an unexpected error has occurred";

    pub fn from_submit_result(result: &Result<Pitch, SubmitError>) -> Self {
        match result {
            Ok(pitch) => Self {
                status: ActionStatus::Success,
                error: String::new(),
                id: Some(pitch.id.to_string()),
                field_errors: None,
            },
            Err(SubmitError::Validation(errors)) => Self {
                status: ActionStatus::Error,
                error: Self::VALIDATION_FAILED.to_string(),
                id: None,
                field_errors: Some(errors.clone()),
            },
            Err(SubmitError::Unexpected(_)) => Self {
                status: ActionStatus::Error,
                error: Self::UNEXPECTED.to_string(),
                id: None,
                field_errors: None,
            },
        }
    }
}

/// Service for submitting and viewing pitches
pub struct PitchService<R>
where
    R: PitchRepository + ?Sized,
{
    pitches: Arc<R>,
}

impl<R> PitchService<R>
where
    R: PitchRepository + ?Sized,
{
    pub fn new(pitches: Arc<R>) -> Self {
        Self { pitches }
    }

    /// Validate a submission and create the pitch.
    ///
    /// The store is not touched when validation fails.
    pub async fn submit(&self, form: &PitchForm) -> Result<Pitch, SubmitError> {
        let new_pitch = validate_pitch(form).map_err(|errors| {
            tracing::debug!(fields = %errors, "Pitch submission failed validation");
            SubmitError::Validation(errors)
        })?;

        let pitch = self.pitches.create(&new_pitch).await.map_err(|e| {
            tracing::error!(error = %e, title = %new_pitch.title, "Failed to create pitch");
            SubmitError::Unexpected(e)
        })?;

        tracing::info!(pitch_id = %pitch.id, slug = %pitch.slug, "Pitch submitted");
        Ok(pitch)
    }

    pub async fn get(&self, id: &PitchId) -> Result<Option<Pitch>, DomainError> {
        self.pitches.find_by_id(id).await
    }

    pub async fn list(&self, query: &PitchQuery) -> Result<Vec<Pitch>, DomainError> {
        self.pitches.list(query).await
    }

    /// Current total views, read past any cache
    pub async fn current_views(&self, id: &PitchId) -> Result<i64, DomainError> {
        self.pitches
            .find_views(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Pitch {} not found", id)))
    }

    pub async fn increment_views(&self, id: &PitchId) -> Result<(), DomainError> {
        self.pitches.increment_views(id).await
    }
}
