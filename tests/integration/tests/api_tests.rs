//! API Integration Tests
//!
//! Runs the HTTP API on an ephemeral port with the in-memory store.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_post_and_list_messages() {
    let server = TestServer::start().await.expect("Failed to start server");
    let author = unique_name("alice");

    let response = server
        .post("/api/messages", &NewMessage::new("hello there", &author))
        .await
        .unwrap();
    let created: EntryDto = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.content, "hello there");
    assert_eq!(created.author, author);
    assert_eq!(created.color.len(), 7);
    assert!(!created.created_at.is_empty());

    let response = server.get("/api/messages").await.unwrap();
    let list: Vec<EntryDto> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, created.id);
}

#[tokio::test]
async fn test_list_respects_limit() {
    let server = TestServer::start().await.expect("Failed to start server");
    for i in 0..5 {
        let response = server
            .post("/api/messages", &NewMessage::new(format!("m{i}"), "Bob"))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server.get("/api/messages?limit=2").await.unwrap();
    let list: Vec<EntryDto> = assert_json(response, StatusCode::OK).await.unwrap();

    let contents: Vec<_> = list.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, vec!["m3", "m4"]);
}

#[tokio::test]
async fn test_post_accepts_pseudo_alias() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/messages", &json!({"content": "salut", "pseudo": "Zoë"}))
        .await
        .unwrap();
    let created: EntryDto = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.author, "Zoë");
}

#[tokio::test]
async fn test_post_invalid_message() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/messages", &NewMessage::new("x".repeat(501), "   "))
        .await
        .unwrap();
    let body: ErrorBodyDto = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "VALIDATION_ERROR");
    let details = body.error.details.expect("field details");
    assert!(details["content"].is_array());
    assert!(details["author"].is_array());

    let response = server.get("/api/messages").await.unwrap();
    let list: Vec<EntryDto> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_unknown_route() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/nothing-here").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
