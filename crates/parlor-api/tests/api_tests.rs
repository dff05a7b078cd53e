//! Router tests for the HTTP surface
//!
//! Requests go straight into the Axum router; no socket is opened.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use parlor_api::{create_app, AppState};
use parlor_common::{AppConfig, ChatConfig};
use parlor_core::{ChatEntry, MessageStore, StoreError, StoreResult};
use parlor_db::MemoryMessageStore;
use parlor_service::ServiceContext;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Store that is always down
struct DownStore;

#[async_trait]
impl MessageStore for DownStore {
    async fn append(&self, _content: &str, _author: &str) -> StoreResult<ChatEntry> {
        Err(StoreError::new("append", "connection refused"))
    }

    async fn recent(&self, _limit: usize) -> StoreResult<Vec<ChatEntry>> {
        Err(StoreError::new("recent", "connection refused"))
    }

    async fn purge_all(&self) -> StoreResult<()> {
        Err(StoreError::new("purge_all", "connection refused"))
    }
}

fn app_with(store: Arc<dyn MessageStore>) -> Router {
    let ctx = ServiceContext::new(store, ChatConfig::default());
    create_app(AppState::new(ctx, AppConfig::default()))
}

fn memory_app() -> (Router, Arc<MemoryMessageStore>) {
    let store = Arc::new(MemoryMessageStore::default());
    (app_with(store.clone()), store)
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = memory_app();

    let (status, body) = call(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_readiness_follows_store() {
    let (app, _) = memory_app();
    let (status, body) = call(&app, get("/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["store"], "healthy");

    let down = app_with(Arc::new(DownStore));
    let (status, body) = call(&down, get("/health/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "not_ready");
}

#[tokio::test]
async fn test_post_then_list() {
    let (app, _) = memory_app();

    let (status, created) = call(
        &app,
        post_json("/api/messages", &json!({"content": "hi", "author": "Alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["content"], "hi");
    assert_eq!(created["author"], "Alice");
    assert!(created["color"].as_str().unwrap().starts_with('#'));

    call(
        &app,
        post_json("/api/messages", &json!({"content": "yo", "pseudo": "Bob"})),
    )
    .await;

    let (status, list) = call(&app, get("/api/messages")).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], created["id"]);
    assert_eq!(list[1]["author"], "Bob");
}

#[tokio::test]
async fn test_list_limit_parsing() {
    let (app, store) = memory_app();
    for i in 0..25 {
        store.append(&format!("m{i}"), "Alice").await.unwrap();
    }

    let (_, list) = call(&app, get("/api/messages?limit=3")).await;
    let contents: Vec<_> = list.as_array().unwrap().iter().map(|e| e["content"].clone()).collect();
    assert_eq!(contents, vec![json!("m22"), json!("m23"), json!("m24")]);

    let (status, list) = call(&app, get("/api/messages?limit=abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 20);

    let (_, list) = call(&app, get("/api/messages?limit=0")).await;
    assert_eq!(list.as_array().unwrap().len(), 20);

    let (_, list) = call(&app, get("/api/messages?limit=1000")).await;
    assert_eq!(list.as_array().unwrap().len(), 25);
}

#[tokio::test]
async fn test_post_validation_failure() {
    let (app, store) = memory_app();

    let (status, body) = call(
        &app,
        post_json("/api/messages", &json!({"content": " ", "author": "a".repeat(51)})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["content"].is_array());
    assert!(body["error"]["details"]["author"].is_array());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_post_malformed_body() {
    let (app, _) = memory_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/messages")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{oops"))
        .unwrap();
    let (status, body) = call(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_BODY");
}

#[tokio::test]
async fn test_store_failure_is_500_without_cause() {
    let app = app_with(Arc::new(DownStore));

    let (status, body) = call(
        &app,
        post_json("/api/messages", &json!({"content": "hi", "author": "Alice"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Internal server error");
    assert!(!body.to_string().contains("connection refused"));

    let (status, _) = call(&app, get("/api/messages")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let (app, _) = memory_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
