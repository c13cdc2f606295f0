//! Page handlers
//!
//! Server-rendered HTML for the listing, the submission form and pitch pages.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use super::ListQuery;
use crate::app::{FieldErrors, PitchForm, SubmitError};
use crate::deferred::Deferred;
use crate::domain::entities::{PitchId, PitchQuery};
use crate::error::DomainError;
use crate::render::{
    render_error_page, render_form_page, render_list_page, render_not_found_page,
    render_pitch_page, Toast,
};
use crate::AppState;

/// Query parameters of the pitch page
#[derive(Debug, Default, Deserialize)]
pub struct ShowQuery {
    /// Set by the redirect that follows a successful submission
    pub created: Option<String>,
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(render_not_found_page())).into_response()
}

fn store_failure(e: DomainError) -> Response {
    tracing::error!(error = %e, "Failed to load page data");
    (StatusCode::INTERNAL_SERVER_ERROR, Html(render_error_page())).into_response()
}

/// GET /
///
/// List pitches, optionally filtered by `?query=`.
pub async fn home(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let query = PitchQuery::new(query.query.as_deref(), query.limit);
    match state.pitch_service.list(&query).await {
        Ok(pitches) => Html(render_list_page(&pitches, query.search.as_deref())).into_response(),
        Err(e) => store_failure(e),
    }
}

/// GET /startup/create
pub async fn new_pitch_form() -> Html<String> {
    Html(render_form_page(
        &PitchForm::default(),
        &FieldErrors::default(),
        None,
    ))
}

/// POST /startup/create
///
/// Validate and create the pitch, then redirect to its page.
/// On failure the form is shown again with the submitted values.
pub async fn submit_pitch(State(state): State<AppState>, Form(form): Form<PitchForm>) -> Response {
    match state.pitch_service.submit(&form).await {
        Ok(pitch) => Redirect::to(&format!("{}?created=1", pitch.path())).into_response(),
        Err(SubmitError::Validation(errors)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render_form_page(&form, &errors, Some(&Toast::invalid_input()))),
        )
            .into_response(),
        Err(SubmitError::Unexpected(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(render_form_page(
                &form,
                &FieldErrors::default(),
                Some(&Toast::unexpected()),
            )),
        )
            .into_response(),
    }
}

/// GET /startup/:id
///
/// Show a pitch with its current view count, then count this visit once the
/// page has been produced.
pub async fn show_pitch(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<ShowQuery>,
    deferred: Deferred,
) -> Response {
    let Some(id) = PitchId::parse(&raw_id) else {
        return not_found();
    };

    let pitch = match state.pitch_service.get(&id).await {
        Ok(Some(pitch)) => pitch,
        Ok(None) => return not_found(),
        Err(e) => return store_failure(e),
    };

    let views = match state.pitch_service.current_views(&id).await {
        Ok(views) => views,
        // Deleted between the two reads
        Err(DomainError::NotFound(_)) => return not_found(),
        Err(e) => return store_failure(e),
    };

    let service = state.pitch_service.clone();
    deferred.after("increment_views", async move { service.increment_views(&id).await });

    let toast = query.created.is_some().then(Toast::created);
    Html(render_pitch_page(&pitch, views, toast.as_ref())).into_response()
}
