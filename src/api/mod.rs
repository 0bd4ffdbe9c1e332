//! HTTP API server

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub const ENTRY_DOCUMENT: &str = "index.html";

/// Build the API router; unmatched paths fall through to the static frontend.
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.static_dir.clone();
    let frontend =
        ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join(ENTRY_DOCUMENT)));

    Router::new()
        .route("/health", get(handlers::health))
        .nest(
            "/api",
            Router::new()
                .route("/weather", get(handlers::weather))
                .route("/stocks", get(handlers::stocks))
                .route("/analyze", post(handlers::analyze)),
        )
        .fallback_service(frontend)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
