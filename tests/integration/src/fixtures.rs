//! Test fixtures and data generators
//!
//! Wire shapes as a client sees them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Unique display name
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}{}", unique_suffix())
}

/// Post message request
#[derive(Debug, Serialize)]
pub struct NewMessage {
    pub content: String,
    pub author: String,
}

impl NewMessage {
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: author.into(),
        }
    }
}

/// Stored entry as returned by the API and in `chat history`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDto {
    pub id: String,
    pub content: String,
    pub author: String,
    pub created_at: String,
    pub color: String,
}

/// Live `chat message` payload
#[derive(Debug, Clone, Deserialize)]
pub struct LiveMessageDto {
    pub id: String,
    pub author: String,
    pub message: String,
    pub timestamp: String,
    pub color: String,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
pub struct ErrorBodyDto {
    pub error: ErrorDetailDto,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetailDto {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<Value>,
}

/// One gateway frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl Frame {
    pub fn new(event: &str, data: Value) -> Self {
        Self {
            event: event.to_string(),
            data,
        }
    }

    /// Decode the payload
    pub fn data_as<T: serde::de::DeserializeOwned>(&self) -> anyhow::Result<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}
