//! Chat entry entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// One persisted chat message. Immutable once the store hands it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    pub id: Snowflake,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl ChatEntry {
    pub fn new(
        id: Snowflake,
        content: impl Into<String>,
        author: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            author: author.into(),
            created_at,
        }
    }

    /// Sort key for chronological history: creation time, then id
    pub fn chronological_key(&self) -> (DateTime<Utc>, Snowflake) {
        (self.created_at, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_with_string_id() {
        let at = DateTime::parse_from_rfc3339("2025-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let entry = ChatEntry::new(Snowflake::new(7), "hi", "Alice", at);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["author"], "Alice");
        assert_eq!(json["createdAt"], "2025-03-01T10:00:00Z");
    }
}
