//! Individual WebSocket connection
//!
//! Represents a single WebSocket connection and its presence record.

use crate::protocol::GatewayMessage;
use parlor_core::{DisplayName, DomainError};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, RwLock};

/// What the room knows about a connection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Presence {
    /// Connected, no name announced yet
    #[default]
    Anonymous,
    /// Name announced; terminal for the life of the connection
    Identified(DisplayName),
}

impl Presence {
    pub fn identity(&self) -> Option<&DisplayName> {
        match self {
            Self::Anonymous => None,
            Self::Identified(name) => Some(name),
        }
    }
}

/// A single WebSocket connection
pub struct Connection {
    /// Unique session ID
    session_id: String,

    /// Presence record, set once by `set username`
    presence: RwLock<Presence>,

    /// Channel to send messages to the WebSocket
    sender: mpsc::Sender<GatewayMessage>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection
    pub fn new(session_id: String, sender: mpsc::Sender<GatewayMessage>) -> Arc<Self> {
        Arc::new(Self {
            session_id,
            presence: RwLock::new(Presence::Anonymous),
            sender,
            created_at: Instant::now(),
        })
    }

    /// Get the session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Announce the display name for this connection
    ///
    /// The name is trimmed before it is stored. A blank or missing name is
    /// rejected, and so is any second announcement; the stored name never
    /// changes once set.
    pub async fn set_identity(&self, raw: Option<&str>) -> Result<DisplayName, DomainError> {
        let mut presence = self.presence.write().await;
        if let Presence::Identified(_) = *presence {
            return Err(DomainError::IdentityAlreadySet);
        }

        let name = raw
            .and_then(|raw| DisplayName::parse(raw).ok())
            .ok_or(DomainError::InvalidIdentity)?;
        *presence = Presence::Identified(name.clone());

        Ok(name)
    }

    /// The announced name, if any
    pub async fn current_identity(&self) -> Option<DisplayName> {
        self.presence.read().await.identity().cloned()
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }

    /// Queue a message for this connection, logging instead of failing
    ///
    /// Returns whether the message was queued. A full queue means the client
    /// is not keeping up; a closed one means it is already gone.
    pub fn deliver(&self, message: GatewayMessage) -> bool {
        match self.sender.try_send(message) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(message)) => {
                tracing::warn!(
                    session_id = %self.session_id,
                    event = %message.event,
                    "Outbound queue full, dropping message"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(message)) => {
                tracing::debug!(
                    session_id = %self.session_id,
                    event = %message.event,
                    "Connection closed, discarding message"
                );
                false
            }
        }
    }

    /// Check if the sender channel is closed
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("created_at", &self.created_at)
            .finish()
    }
}
