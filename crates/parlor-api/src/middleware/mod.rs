//! Middleware stack for the API server
//!
//! Every request gets an `x-request-id`, a tracing span carrying it, a 30 s
//! budget and the configured CORS policy.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header::{self, HeaderName}, HeaderValue, Method, Request, StatusCode},
    Router,
};
use parlor_common::CorsConfig;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Wrap `router` in the request-id, tracing, timeout and CORS layers
pub fn apply_middleware(
    router: Router<AppState>,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, request_id_header()])
        .expose_headers([request_id_header()])
        .allow_origin(allowed_origins(cors_config, is_production));

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id_header()))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(request_span)
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::SERVICE_UNAVAILABLE,
                REQUEST_TIMEOUT,
            ))
            .layer(cors),
    )
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Configured origins; with none configured, any origin outside production
/// and no origin in production.
fn allowed_origins(config: &CorsConfig, is_production: bool) -> AllowOrigin {
    if config.allowed_origins.is_empty() {
        if is_production {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; browsers will be refused");
            return AllowOrigin::list(Vec::<HeaderValue>::new());
        }
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    tracing::info!(count = origins.len(), "CORS origins configured");
    AllowOrigin::list(origins)
}
