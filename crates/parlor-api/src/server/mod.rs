//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use axum::Router;
use parlor_common::{AppConfig, AppError};
use parlor_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router().merge(health_routes());
    let router = apply_middleware(
        router,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let store = parlor_db::connect_store(&config, config.api.node_id)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let service_context = ServiceContextBuilder::new()
        .store(store)
        .chat_config(config.chat)
        .build()?;

    Ok(AppState::new(service_context, config))
}

/// Serve the API on an already bound listener
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), AppError> {
    let app = create_app(state);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(anyhow::Error::new(e).context("HTTP server error")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    // Create app state
    let state = create_app_state(config).await?;

    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::internal(anyhow::Error::new(e).context(format!("failed to bind to {addr}")))
    })?;

    info!("Server listening on http://{}", addr);

    serve(listener, state).await
}
