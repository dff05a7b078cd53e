//! WebSocket handler
//!
//! Handles WebSocket connections and message processing.

use crate::connection::Connection;
use crate::handlers::{HandlerError, HandlerResult, MessageDispatcher, PresenceHandler};
use crate::protocol::GatewayMessage;
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::FutureExt;
use futures_util::{SinkExt, StreamExt};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Channel buffer size for outgoing messages
const MESSAGE_BUFFER_SIZE: usize = 100;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket) {
    // Create message channel for outgoing messages
    let (tx, mut rx) = mpsc::channel::<GatewayMessage>(MESSAGE_BUFFER_SIZE);

    // Register connection
    let connection = state.connection_manager().register(tx);
    let session_id = connection.session_id().to_string();

    tracing::info!(
        session_id = %session_id,
        connections = state.connection_manager().connection_count(),
        "WebSocket connection established"
    );

    // Split the WebSocket
    let (mut ws_sink, mut ws_stream) = socket.split();

    let state_recv = state.clone();
    let session_id_recv = session_id.clone();
    let connection_recv = Arc::clone(&connection);

    // Events from one connection are handled one at a time, in arrival order
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_message(&state_recv, &connection_recv, text.as_str()).await;
                }
                Ok(Message::Binary(_)) => {
                    report_error(&connection_recv, &HandlerError::UnsupportedFrame);
                }
                Ok(Message::Ping(_)) => {
                    tracing::trace!(session_id = %session_id_recv, "Ping received");
                    // Pong is handled automatically by axum
                }
                Ok(Message::Pong(_)) => {
                    tracing::trace!(session_id = %session_id_recv, "Pong received");
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(session_id = %session_id_recv, "Client closed connection");
                    break;
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %session_id_recv,
                        error = %e,
                        "WebSocket read failed"
                    );
                    break;
                }
            }
        }
    });

    let session_id_send = session_id.clone();

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match msg.to_json() {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id_send,
                        error = %e,
                        "Failed to encode message"
                    );
                    continue;
                }
            };
            if ws_sink.send(Message::Text(json.into())).await.is_err() {
                tracing::debug!(
                    session_id = %session_id_send,
                    "Failed to send message to WebSocket"
                );
                break;
            }
        }

        // Close the WebSocket when channel is closed
        let _ = ws_sink.close().await;
    });

    // A dead writer usually means the reader is about to see the close too;
    // let it finish the event in hand before tearing down.
    let send_ended_first = tokio::select! {
        _ = &mut recv_task => false,
        _ = &mut send_task => true,
    };
    if send_ended_first {
        tracing::debug!(session_id = %session_id, "Send task ended");
        let _ = recv_task.await;
    } else {
        tracing::debug!(session_id = %session_id, "Receive task ended");
    }

    // Clean up
    cleanup_connection(&state, &session_id).await;
    drop(connection);
}

/// Handle a text frame from the client
///
/// Any failure, including a panic inside a handler, turns into one private
/// `error` event; the connection stays open.
pub async fn handle_text_message(state: &GatewayState, connection: &Arc<Connection>, text: &str) {
    let outcome = AssertUnwindSafe(process_text(state, connection, text))
        .catch_unwind()
        .await;

    let result = outcome.unwrap_or_else(|panic| {
        tracing::error!(
            session_id = %connection.session_id(),
            panic = %panic_message(panic.as_ref()),
            "Event handler panicked"
        );
        Err(HandlerError::Internal("event handler panicked".to_string()))
    });

    if let Err(e) = result {
        report_error(connection, &e);
    }
}

async fn process_text(
    state: &GatewayState,
    connection: &Arc<Connection>,
    text: &str,
) -> HandlerResult<()> {
    let message = GatewayMessage::from_json(text)
        .map_err(|e| HandlerError::MalformedFrame(e.to_string()))?;

    tracing::trace!(
        session_id = %connection.session_id(),
        event = %message.event,
        "Received message"
    );

    MessageDispatcher::dispatch(state, connection, message).await
}

fn report_error(connection: &Connection, error: &HandlerError) {
    if error.is_server_fault() {
        tracing::warn!(
            session_id = %connection.session_id(),
            error = ?error,
            "Handler error"
        );
    } else {
        tracing::debug!(
            session_id = %connection.session_id(),
            error = %error,
            "Rejected client event"
        );
    }

    connection.deliver(GatewayMessage::error(error.client_message()));
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Clean up a connection on disconnect
pub async fn cleanup_connection(state: &GatewayState, session_id: &str) {
    tracing::info!(session_id = %session_id, "Cleaning up connection");

    PresenceHandler::disconnect(state, session_id).await;
}
