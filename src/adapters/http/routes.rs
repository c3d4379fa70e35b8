//! Route table and shared middleware.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Builds the full router with CORS and request tracing applied.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/session/start", post(handlers::start_session))
        .route("/api/chat", post(handlers::chat))
        .route("/api/session/:id", get(handlers::get_session))
        .route("/api/services", get(handlers::list_services))
        .route("/api/search", post(handlers::search))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
