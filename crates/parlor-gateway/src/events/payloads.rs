//! Event payload definitions
//!
//! Data structures for server-sent events that are not plain strings or
//! echoed client payloads.

use chrono::{DateTime, Utc};
use parlor_core::{username_color, ChatEntry};
use serde::{Deserialize, Serialize};

/// `chat message` payload for a freshly stored entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessagePayload {
    pub id: String,
    pub author: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub color: String,
}

impl From<&ChatEntry> for ChatMessagePayload {
    fn from(entry: &ChatEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            author: entry.author.clone(),
            message: entry.content.clone(),
            timestamp: entry.created_at,
            color: username_color(&entry.author).to_string(),
        }
    }
}

/// `user joined` / `user left` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresencePayload {
    pub username: String,
}

/// `collabdoc init` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInitPayload {
    pub text: String,
}
