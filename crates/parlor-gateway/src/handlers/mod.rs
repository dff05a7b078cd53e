//! Event handlers
//!
//! Handles incoming WebSocket messages based on their event name.

mod canvas;
mod chat;
mod document;
mod error;
mod history;
mod identify;
mod presence;

pub use canvas::CanvasHandler;
pub use chat::ChatHandler;
pub use document::DocumentHandler;
pub use error::{HandlerError, HandlerResult};
pub use history::HistoryHandler;
pub use identify::IdentifyHandler;
pub use presence::PresenceHandler;

use crate::connection::Connection;
use crate::events::ClientEvent;
use crate::protocol::GatewayMessage;
use crate::server::GatewayState;
use std::sync::Arc;

/// Dispatch incoming client messages to appropriate handlers
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Handle an incoming client message
    pub async fn dispatch(
        state: &GatewayState,
        connection: &Arc<Connection>,
        message: GatewayMessage,
    ) -> HandlerResult<()> {
        let Some(event) = message.client_event() else {
            tracing::debug!(
                session_id = %connection.session_id(),
                event = %message.event,
                "Unknown event from client"
            );
            return Err(HandlerError::UnknownEvent(message.event));
        };

        match event {
            ClientEvent::SetUsername => {
                IdentifyHandler::handle(state, connection, message.as_username()).await
            }
            ClientEvent::ChatMessage => {
                let text = message.as_chat_text().ok_or_else(|| {
                    HandlerError::InvalidPayload("chat message must be text".to_string())
                })?;

                ChatHandler::handle(state, connection, text).await
            }
            ClientEvent::GetHistory => {
                let limit = message.as_history_limit().ok_or_else(|| {
                    HandlerError::InvalidPayload("history limit must be an integer".to_string())
                })?;

                HistoryHandler::handle(state, connection, limit).await
            }
            ClientEvent::CanvasGet => {
                CanvasHandler::snapshot(state, connection);
                Ok(())
            }
            ClientEvent::CanvasPixel => {
                let pixel = message.as_pixel().ok_or_else(|| {
                    HandlerError::InvalidPayload(
                        "rplace pixel needs a numeric idx and text color and user".to_string(),
                    )
                })?;

                CanvasHandler::paint(state, &pixel)
            }
            ClientEvent::DocumentGet => {
                DocumentHandler::snapshot(state, connection);
                Ok(())
            }
            ClientEvent::DocumentUpdate => {
                let update = message.as_document_update().ok_or_else(|| {
                    HandlerError::InvalidPayload("collabdoc update needs text".to_string())
                })?;

                DocumentHandler::update(state, connection, &update);
                Ok(())
            }
        }
    }
}
