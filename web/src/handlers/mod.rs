//! HTTP handlers
//!
//! Axum request handlers: server-rendered pages and the JSON API.

pub mod api;
pub mod pages;

pub use api::{create_pitch, get_pitch, get_views, list_pitches, preview_markdown};
pub use pages::{home, new_pitch_form, show_pitch, submit_pitch};

use serde::Deserialize;

/// Query parameters for listing pitches
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub query: Option<String>,
    pub limit: Option<i64>,
}
