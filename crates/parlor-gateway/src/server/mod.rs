//! Gateway server setup
//!
//! Provides the main WebSocket server configuration and routes.

mod handler;
mod state;

pub use handler::{cleanup_connection, gateway_handler, handle_text_message};
pub use state::GatewayState;

use axum::{routing::get, Json, Router};
use parlor_common::{AppConfig, AppError};
use parlor_service::dto::HealthResponse;
use parlor_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/gateway", get(gateway_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize all dependencies and create `GatewayState`
pub async fn create_gateway_state(config: AppConfig) -> Result<GatewayState, AppError> {
    let store = parlor_db::connect_store(&config, config.gateway.node_id)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let service_context = ServiceContextBuilder::new()
        .store(store)
        .chat_config(config.chat)
        .build()?;

    Ok(GatewayState::new(service_context))
}

/// Serve the gateway on an already bound listener
pub async fn serve(listener: TcpListener, state: GatewayState) -> Result<(), AppError> {
    let app = create_app(state);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(anyhow::Error::new(e).context("gateway server error")))
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.gateway.address();

    // Create gateway state
    let state = create_gateway_state(config).await?;

    tracing::info!("Starting Gateway server on {}", addr);

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::internal(anyhow::Error::new(e).context(format!("failed to bind to {addr}")))
    })?;

    tracing::info!("Gateway listening on ws://{}/gateway", addr);

    serve(listener, state).await
}
