//! Route definitions

use axum::{routing::get, Router};

use crate::handlers::{health, messages};
use crate::state::AppState;

/// Create the main API router
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/messages",
        get(messages::list_messages).post(messages::create_message),
    )
}
