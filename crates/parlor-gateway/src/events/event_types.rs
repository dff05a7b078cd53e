//! Gateway event names
//!
//! Wire names are lower-case phrases with spaces, e.g. `chat message`.

use std::fmt;

/// Events a client may send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientEvent {
    /// Announce the display name for this connection
    SetUsername,
    /// Post a chat message
    ChatMessage,
    /// Ask for recent history
    GetHistory,
    /// Ask for the whole pixel grid
    CanvasGet,
    /// Paint one pixel
    CanvasPixel,
    /// Ask for the shared document text
    DocumentGet,
    /// Replace the shared document text
    DocumentUpdate,
}

impl ClientEvent {
    /// Get the wire name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetUsername => "set username",
            Self::ChatMessage => "chat message",
            Self::GetHistory => "get history",
            Self::CanvasGet => "rplace get",
            Self::CanvasPixel => "rplace pixel",
            Self::DocumentGet => "collabdoc get",
            Self::DocumentUpdate => "collabdoc update",
        }
    }

    /// Parse a wire name
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "set username" => Some(Self::SetUsername),
            "chat message" => Some(Self::ChatMessage),
            "get history" => Some(Self::GetHistory),
            "rplace get" => Some(Self::CanvasGet),
            "rplace pixel" => Some(Self::CanvasPixel),
            "collabdoc get" => Some(Self::DocumentGet),
            "collabdoc update" => Some(Self::DocumentUpdate),
            _ => None,
        }
    }
}

/// Events the server sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerEvent {
    ChatHistory,
    ChatMessage,
    UserJoined,
    UserLeft,
    Error,
    CanvasGrid,
    CanvasPixel,
    DocumentInit,
    DocumentUpdate,
}

impl ServerEvent {
    /// Get the wire name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChatHistory => "chat history",
            Self::ChatMessage => "chat message",
            Self::UserJoined => "user joined",
            Self::UserLeft => "user left",
            Self::Error => "error",
            Self::CanvasGrid => "rplace grid",
            Self::CanvasPixel => "rplace pixel",
            Self::DocumentInit => "collabdoc init",
            Self::DocumentUpdate => "collabdoc update",
        }
    }
}

impl fmt::Display for ClientEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ServerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ServerEvent> for String {
    fn from(event: ServerEvent) -> Self {
        event.as_str().to_string()
    }
}
