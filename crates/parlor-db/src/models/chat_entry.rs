//! Chat entry database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the chat_entries table
#[derive(Debug, Clone, FromRow)]
pub struct ChatEntryModel {
    pub id: i64,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}
