//! Event dispatcher
//!
//! Owns the room-wide fan-out. Chat posts go through a single ordering lock
//! so that the order in which entries are stored is the order in which every
//! client receives them.

use crate::connection::ConnectionManager;
use crate::protocol::GatewayMessage;
use parlor_core::{ChatEntry, DisplayName};
use parlor_service::{MessageService, ServiceContext, ServiceResult};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Routes outbound events to connections
pub struct EventDispatcher {
    /// Connection manager for sending messages
    connection_manager: Arc<ConnectionManager>,
    /// Held from append to enqueue for each chat entry
    order: Mutex<()>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    pub fn new(connection_manager: Arc<ConnectionManager>) -> Self {
        Self {
            connection_manager,
            order: Mutex::new(()),
        }
    }

    /// Store a chat message and fan it out to every connection, sender included
    ///
    /// Nothing is broadcast unless the append succeeds.
    pub async fn post_chat_message(
        &self,
        ctx: &ServiceContext,
        text: Option<&str>,
        author: &DisplayName,
    ) -> ServiceResult<ChatEntry> {
        let _order = self.order.lock().await;

        let entry = MessageService::new(ctx)
            .post_message(text, Some(author.as_str()))
            .await?;

        let sent = self
            .connection_manager
            .broadcast(&GatewayMessage::chat_message(&entry));
        tracing::trace!(entry_id = %entry.id, sent = sent, "Chat message dispatched");

        Ok(entry)
    }

    /// Send a message to all connections
    pub fn broadcast(&self, message: &GatewayMessage) -> usize {
        self.connection_manager.broadcast(message)
    }

    /// Send a message to all connections but one
    pub fn broadcast_except(&self, session_id: &str, message: &GatewayMessage) -> usize {
        self.connection_manager.broadcast_except(session_id, message)
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("connection_manager", &self.connection_manager)
            .finish()
    }
}
