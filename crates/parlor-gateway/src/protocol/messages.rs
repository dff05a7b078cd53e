//! Gateway message format
//!
//! Defines the envelope for all WebSocket frames and the typed views onto it.

use super::{DocumentUpdatePayload, PixelPayload};
use crate::events::{
    ChatMessagePayload, ClientEvent, DocumentInitPayload, PresencePayload, ServerEvent,
};
use crate::widgets::PixelCell;
use parlor_core::{ChatEntry, DisplayName};
use parlor_service::dto::ChatEntryResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gateway message format
///
/// All frames sent over the WebSocket connection follow this format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayMessage {
    /// Event name
    pub event: String,

    /// Event data payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl GatewayMessage {
    /// Create a message for a server event
    #[must_use]
    pub fn new(event: ServerEvent, data: impl Serialize) -> Self {
        Self {
            event: event.into(),
            data: Some(serde_json::to_value(data).unwrap_or_default()),
        }
    }

    // === Server Messages ===

    /// `chat history`: entries oldest-first
    #[must_use]
    pub fn chat_history(entries: &[ChatEntryResponse]) -> Self {
        Self::new(ServerEvent::ChatHistory, entries)
    }

    /// `chat message` for a stored entry
    #[must_use]
    pub fn chat_message(entry: &ChatEntry) -> Self {
        Self::new(ServerEvent::ChatMessage, ChatMessagePayload::from(entry))
    }

    #[must_use]
    pub fn user_joined(name: &DisplayName) -> Self {
        Self::new(
            ServerEvent::UserJoined,
            PresencePayload {
                username: name.to_string(),
            },
        )
    }

    #[must_use]
    pub fn user_left(name: &DisplayName) -> Self {
        Self::new(
            ServerEvent::UserLeft,
            PresencePayload {
                username: name.to_string(),
            },
        )
    }

    /// `error` with a human-readable description
    #[must_use]
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            event: ServerEvent::Error.into(),
            data: Some(Value::String(description.into())),
        }
    }

    #[must_use]
    pub fn canvas_grid(cells: &[PixelCell]) -> Self {
        Self::new(ServerEvent::CanvasGrid, cells)
    }

    #[must_use]
    pub fn canvas_pixel(pixel: &PixelPayload) -> Self {
        Self::new(ServerEvent::CanvasPixel, pixel)
    }

    #[must_use]
    pub fn document_init(text: impl Into<String>) -> Self {
        Self::new(
            ServerEvent::DocumentInit,
            DocumentInitPayload { text: text.into() },
        )
    }

    #[must_use]
    pub fn document_update(update: &DocumentUpdatePayload) -> Self {
        Self::new(ServerEvent::DocumentUpdate, update)
    }

    // === Parsing Client Messages ===

    /// The client event this frame names, if it is one
    pub fn client_event(&self) -> Option<ClientEvent> {
        ClientEvent::parse(&self.event)
    }

    /// Announced name for `set username`; `None` unless the data is text
    pub fn as_username(&self) -> Option<&str> {
        self.data.as_ref().and_then(Value::as_str)
    }

    /// Text of a `chat message`
    ///
    /// `Some(None)` when no text was sent at all, `None` when the data is not
    /// text.
    pub fn as_chat_text(&self) -> Option<Option<&str>> {
        match &self.data {
            None | Some(Value::Null) => Some(None),
            Some(Value::String(text)) => Some(Some(text.as_str())),
            Some(_) => None,
        }
    }

    /// Requested size for `get history`
    ///
    /// `Some(None)` asks for the default. Negative integers come back as zero,
    /// which reads no entries; anything else that is not an integer yields
    /// `None`.
    pub fn as_history_limit(&self) -> Option<Option<usize>> {
        match &self.data {
            None | Some(Value::Null) => Some(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
                .or_else(|| n.as_i64().map(|_| 0))
                .map(Some),
            Some(_) => None,
        }
    }

    /// Try to parse as an `rplace pixel` payload
    pub fn as_pixel(&self) -> Option<PixelPayload> {
        self.data
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Try to parse as a `collabdoc update` payload
    pub fn as_document_update(&self) -> Option<DocumentUpdatePayload> {
        self.data
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    // === Utilities ===

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for GatewayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GatewayMessage(event={})", self.event)
    }
}
