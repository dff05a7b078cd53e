//! Connection manager
//!
//! Registry of all live connections using DashMap for thread-safe access.
//! Fan-out never waits on a slow client: each connection gets a `try_send`
//! and anything that cannot be queued is logged and skipped.

use super::Connection;
use crate::protocol::GatewayMessage;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    /// Active connections by session ID
    connections: DashMap<String, Arc<Connection>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection under a fresh session ID
    pub fn register(&self, sender: mpsc::Sender<GatewayMessage>) -> Arc<Connection> {
        self.add_connection(Uuid::new_v4().to_string(), sender)
    }

    /// Register a new connection
    pub fn add_connection(
        &self,
        session_id: String,
        sender: mpsc::Sender<GatewayMessage>,
    ) -> Arc<Connection> {
        let connection = Connection::new(session_id.clone(), sender);
        self.connections.insert(session_id.clone(), connection.clone());

        tracing::debug!(session_id = %session_id, "Connection added");

        connection
    }

    /// Remove a connection, handing back its record
    pub fn remove_connection(&self, session_id: &str) -> Option<Arc<Connection>> {
        let removed = self.connections.remove(session_id).map(|(_, c)| c);
        if removed.is_some() {
            tracing::debug!(session_id = %session_id, "Connection removed");
        }
        removed
    }

    /// Broadcast a message to all connections
    pub fn broadcast(&self, message: &GatewayMessage) -> usize {
        self.fan_out(None, message)
    }

    /// Broadcast a message to every connection except `session_id`
    pub fn broadcast_except(&self, session_id: &str, message: &GatewayMessage) -> usize {
        self.fan_out(Some(session_id), message)
    }

    fn fan_out(&self, exclude: Option<&str>, message: &GatewayMessage) -> usize {
        let mut sent = 0;

        for entry in self.connections.iter() {
            if exclude == Some(entry.key().as_str()) {
                continue;
            }
            if entry.deliver(message.clone()) {
                sent += 1;
            }
        }

        tracing::debug!(
            event = %message.event,
            sent = sent,
            "Message broadcast"
        );

        sent
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .finish()
    }
}
