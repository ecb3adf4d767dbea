//! Social Solver Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod views;

use axum::{
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Build the application router with all routes and the static diagram mount
pub fn build_router(state: Arc<AppState>) -> Router {
    let diagram_files = ServeDir::new(state.diagrams.dir());
    let public_prefix = state.diagrams.public_prefix().to_string();

    Router::new()
        .route("/", get(api::solve::index).post(api::solve::submit))
        .route("/search_diagrams", post(api::diagrams::search_diagrams))
        .route("/api/solve", post(api::solve::solve_json))
        .route("/api/health", get(api::health::health_check))
        .nest_service(&public_prefix, diagram_files)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(state)
}
