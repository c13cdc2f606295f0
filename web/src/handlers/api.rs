//! JSON API handlers
//!
//! The submission boundary for non-browser clients: form values in, action
//! state out. Reading views here counts as a visit, like the pitch page.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use super::ListQuery;
use crate::app::{ActionState, PitchForm, SubmitError};
use crate::deferred::Deferred;
use crate::domain::entities::{Pitch, PitchId, PitchQuery};
use crate::error::AppError;
use crate::render::render_markdown;
use crate::AppState;

/// Response for a single pitch
#[derive(Debug, Serialize)]
pub struct PitchResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub pitch: String,
    pub views: i64,
    pub created_at: String,
}

impl From<Pitch> for PitchResponse {
    fn from(p: Pitch) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title,
            slug: p.slug,
            description: p.description,
            category: p.category,
            image: p.image,
            pitch: p.pitch,
            views: p.views,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Response for the view counter
#[derive(Debug, Serialize)]
pub struct ViewsResponse {
    pub id: String,
    pub views: i64,
}

/// Response for a markdown preview
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub html: String,
}

fn parse_id(raw: &str) -> Result<PitchId, AppError> {
    PitchId::parse(raw).ok_or_else(|| AppError::NotFound(format!("Pitch {} not found", raw)))
}

/// POST /api/pitches
///
/// Submit a pitch. Always answers with an action state.
pub async fn create_pitch(
    State(state): State<AppState>,
    Json(form): Json<PitchForm>,
) -> (StatusCode, Json<ActionState>) {
    let result = state.pitch_service.submit(&form).await;
    let status = match &result {
        Ok(_) => StatusCode::CREATED,
        Err(SubmitError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        Err(SubmitError::Unexpected(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(ActionState::from_submit_result(&result)))
}

/// GET /api/pitches
///
/// List pitches newest first.
pub async fn list_pitches(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PitchResponse>>, AppError> {
    let query = PitchQuery::new(query.query.as_deref(), query.limit);
    let pitches = state.pitch_service.list(&query).await?;

    Ok(Json(pitches.into_iter().map(PitchResponse::from).collect()))
}

/// GET /api/pitches/:id
pub async fn get_pitch(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<PitchResponse>, AppError> {
    let id = parse_id(&raw_id)?;
    let pitch = state
        .pitch_service
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Pitch {} not found", id)))?;

    Ok(Json(pitch.into()))
}

/// GET /api/pitches/:id/views
///
/// Current view count; the visit is counted after the response.
pub async fn get_views(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    deferred: Deferred,
) -> Result<Json<ViewsResponse>, AppError> {
    let id = parse_id(&raw_id)?;
    let views = state.pitch_service.current_views(&id).await?;

    let service = state.pitch_service.clone();
    let task_id = id.clone();
    deferred.after("increment_views", async move {
        service.increment_views(&task_id).await
    });

    Ok(Json(ViewsResponse {
        id: id.to_string(),
        views,
    }))
}

/// POST /api/pitches/preview
///
/// Render a markdown pitch body the way the pitch page will.
pub async fn preview_markdown(body: String) -> Json<PreviewResponse> {
    Json(PreviewResponse {
        html: render_markdown(&body),
    })
}
