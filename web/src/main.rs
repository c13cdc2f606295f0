//! Launchpad web service
//!
//! Submit startup pitches through a validated form and read them back with a
//! view counter. Pitches live in an external document store (Sanity).
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod deferred;
mod domain;
mod error;
mod handlers;
mod render;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod integration_tests;

use adapters::{InMemoryPitchRepository, SanityClient, SanityPitchRepository};
use app::PitchService;
use config::{Config, RateLimit, StoreBackend};
use domain::ports::PitchRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pitch_service: Arc<PitchService<dyn PitchRepository>>,
}

impl AppState {
    pub fn new(pitches: Arc<dyn PitchRepository>) -> Self {
        Self {
            pitch_service: Arc::new(PitchService::new(pitches)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router; `submit_limit` rate limits submissions per peer IP
pub fn build_router(state: AppState, submit_limit: Option<RateLimit>) -> anyhow::Result<Router> {
    // Only the submissions themselves; the form page stays unlimited
    let submit_routes = Router::new()
        .route("/startup/create", post(handlers::submit_pitch))
        .route("/api/pitches", post(handlers::create_pitch));

    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let submit_routes = match submit_limit {
        Some(limit) => {
            let governor_config = Arc::new(
                GovernorConfigBuilder::default()
                    .key_extractor(PeerIpKeyExtractor)
                    .per_second(limit.per_second)
                    .burst_size(limit.burst)
                    .finish()
                    .context("invalid submission rate limit")?,
            );
            submit_routes.layer(GovernorLayer {
                config: governor_config,
            })
        }
        None => submit_routes,
    };

    let api_routes = Router::new()
        .route("/api/pitches", get(handlers::list_pitches))
        .route("/api/pitches/preview", post(handlers::preview_markdown))
        .route("/api/pitches/:id", get(handlers::get_pitch))
        .route("/api/pitches/:id/views", get(handlers::get_views))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let app = Router::new()
        // Health check
        .route("/health", get(health))
        // Pages
        .route("/", get(handlers::home))
        .route("/startup/create", get(handlers::new_pitch_form))
        .route("/startup/:id", get(handlers::show_pitch))
        .merge(api_routes)
        .merge(submit_routes)
        // Middleware
        .layer(middleware::from_fn(deferred::run_after_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn PitchRepository>> {
    match config.store_backend {
        StoreBackend::Sanity => {
            let sanity = config
                .sanity
                .as_ref()
                .context("Sanity backend selected without Sanity settings")?;
            tracing::info!(
                project_id = %sanity.project_id,
                dataset = %sanity.dataset,
                use_cdn = sanity.use_cdn,
                "Using Sanity content store"
            );
            let client = Arc::new(SanityClient::new(sanity));
            Ok(Arc::new(SanityPitchRepository::new(client)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory pitch store; data is lost on restart");
            Ok(Arc::new(InMemoryPitchRepository::new()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,launchpad=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Launchpad...");

    // Load configuration
    let config = Config::from_env().context("failed to load configuration")?;

    let pitches = build_repository(&config)?;
    let state = AppState::new(pitches);
    let app = build_router(state, config.submit_rate_limit)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}
