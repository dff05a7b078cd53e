//! Gateway Integration Tests
//!
//! Drives the WebSocket gateway with real clients. The API and gateway share
//! one in-memory store where a test needs both.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::time::Duration;

use integration_tests::{assert_json, fixtures::*, GatewayServer, TestStack, WsClient};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio_tungstenite::tungstenite::Message;

const QUIET: Duration = Duration::from_millis(200);

/// Connect and wait until the server has registered the connection
async fn connect(gateway: &GatewayServer) -> WsClient {
    let mut client = gateway.connect().await.expect("Failed to connect");
    client.emit("collabdoc get", Value::Null).await.unwrap();
    client.expect("collabdoc init").await.unwrap();
    client
}

/// Announce `name` and return the history sent back
async fn join(client: &mut WsClient, name: &str) -> Vec<EntryDto> {
    client.emit("set username", json!(name)).await.unwrap();
    let frame = client.expect("chat history").await.unwrap();
    frame.data_as().unwrap()
}

// ============================================================================
// Chat Tests
// ============================================================================

#[tokio::test]
async fn test_two_users_chat_and_leave() {
    let gateway = GatewayServer::start().await.expect("Failed to start gateway");
    let mut alice = connect(&gateway).await;
    let mut bob = connect(&gateway).await;

    assert!(join(&mut alice, "Alice").await.is_empty());
    let joined: Value = bob.expect("user joined").await.unwrap().data;
    assert_eq!(joined["username"], "Alice");

    join(&mut bob, "Bob").await;
    let joined: Value = alice.expect("user joined").await.unwrap().data;
    assert_eq!(joined["username"], "Bob");

    alice.emit("chat message", json!("hello")).await.unwrap();
    for client in [&mut alice, &mut bob] {
        let live: LiveMessageDto = client
            .expect("chat message")
            .await
            .unwrap()
            .data_as()
            .unwrap();
        assert_eq!(live.author, "Alice");
        assert_eq!(live.message, "hello");
        assert!(live.color.starts_with('#'));
    }

    bob.close().await.unwrap();
    let left = alice.expect("user left").await.unwrap();
    assert_eq!(left.data["username"], "Bob");
    alice.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_chat_requires_username() {
    let gateway = GatewayServer::start().await.expect("Failed to start gateway");
    let mut alice = connect(&gateway).await;

    alice.emit("chat message", json!("anyone?")).await.unwrap();
    let error = alice.expect("error").await.unwrap();

    assert_eq!(error.data, json!("must set identity first"));
}

#[tokio::test]
async fn test_history_is_shared_with_http_api() {
    let stack = TestStack::start().await.expect("Failed to start servers");

    let response = stack
        .api
        .post("/api/messages", &NewMessage::new("from http", "Carol"))
        .await
        .unwrap();
    let posted: EntryDto = assert_json(response, StatusCode::CREATED).await.unwrap();

    let mut dave = connect(&stack.gateway).await;
    let history = join(&mut dave, "Dave").await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, posted.id);

    dave.emit("chat message", json!("from ws")).await.unwrap();
    let live: LiveMessageDto = dave.expect("chat message").await.unwrap().data_as().unwrap();

    let response = stack.api.get("/api/messages").await.unwrap();
    let list: Vec<EntryDto> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].id, live.id);
    assert_eq!(stack.store.len().await, 2);
}

#[tokio::test]
async fn test_get_history_with_limit() {
    let gateway = GatewayServer::start().await.expect("Failed to start gateway");
    let mut erin = connect(&gateway).await;
    join(&mut erin, "Erin").await;

    for i in 0..3 {
        erin.emit("chat message", json!(format!("m{i}"))).await.unwrap();
        erin.expect("chat message").await.unwrap();
    }

    erin.emit("get history", json!(2)).await.unwrap();
    let history: Vec<EntryDto> = erin.expect("chat history").await.unwrap().data_as().unwrap();

    let contents: Vec<_> = history.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, vec!["m1", "m2"]);
}

// ============================================================================
// Protocol Tests
// ============================================================================

#[tokio::test]
async fn test_bad_frames_keep_connection_open() {
    let gateway = GatewayServer::start().await.expect("Failed to start gateway");
    let mut client = connect(&gateway).await;

    client
        .send_raw(Message::Binary(vec![1, 2, 3].into()))
        .await
        .unwrap();
    let error = client.expect("error").await.unwrap();
    assert_eq!(error.data, json!("Binary frames are not supported"));

    client
        .send_raw(Message::Text("not json".to_string().into()))
        .await
        .unwrap();
    let error = client.expect("error").await.unwrap();
    assert_eq!(error.data, json!("Invalid message format"));

    client.emit("dance", json!({})).await.unwrap();
    let error = client.expect("error").await.unwrap();
    assert_eq!(error.data, json!("Unknown event: dance"));

    // still usable
    join(&mut client, "Frank").await;
}

#[tokio::test]
async fn test_gateway_health() {
    let gateway = GatewayServer::start().await.expect("Failed to start gateway");
    let response = reqwest::get(format!("http://{}/health", gateway.addr))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "OK");
}

// ============================================================================
// Widget Tests
// ============================================================================

#[tokio::test]
async fn test_canvas_paint_reaches_everyone() {
    let gateway = GatewayServer::start().await.expect("Failed to start gateway");
    let mut painter = connect(&gateway).await;
    let mut viewer = connect(&gateway).await;

    let pixel = json!({"idx": 17, "color": "#FF0000", "user": "Gina"});
    painter.emit("rplace pixel", pixel.clone()).await.unwrap();

    for client in [&mut painter, &mut viewer] {
        let frame = client.expect("rplace pixel").await.unwrap();
        assert_eq!(frame.data, pixel);
    }

    viewer.emit("rplace get", Value::Null).await.unwrap();
    let grid = viewer.expect("rplace grid").await.unwrap().data;
    assert_eq!(grid.as_array().map(Vec::len), Some(256));
    assert_eq!(grid[17]["color"], "#FF0000");
    assert_eq!(grid[0]["color"], "#FFFFFF");

    painter
        .emit("rplace pixel", json!({"idx": 256, "color": "#000000", "user": "Gina"}))
        .await
        .unwrap();
    painter.expect("error").await.unwrap();
    viewer.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_document_update_skips_sender() {
    let gateway = GatewayServer::start().await.expect("Failed to start gateway");
    let mut writer = connect(&gateway).await;
    let mut reader = connect(&gateway).await;

    writer
        .emit("collabdoc update", json!({"text": "draft one", "user": "Hal"}))
        .await
        .unwrap();

    let update = reader.expect("collabdoc update").await.unwrap();
    assert_eq!(update.data["text"], "draft one");
    writer.expect_silence(QUIET).await.unwrap();

    writer.emit("collabdoc get", Value::Null).await.unwrap();
    let init = writer.expect("collabdoc init").await.unwrap();
    assert_eq!(init.data["text"], "draft one");
}
