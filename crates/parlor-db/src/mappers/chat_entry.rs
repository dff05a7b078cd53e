//! ChatEntry model -> entity mapper

use parlor_core::{ChatEntry, Snowflake};

use crate::models::ChatEntryModel;

impl From<ChatEntryModel> for ChatEntry {
    fn from(model: ChatEntryModel) -> Self {
        ChatEntry {
            id: Snowflake::new(model.id),
            content: model.content,
            author: model.author,
            created_at: model.created_at,
        }
    }
}
