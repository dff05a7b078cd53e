//! In-process MessageStore

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::instrument;

use parlor_core::{ChatEntry, MessageStore, SnowflakeGenerator, StoreResult};

/// Message store backed by a `Vec` in process memory.
///
/// History is lost on restart and is not shared between processes.
pub struct MemoryMessageStore {
    entries: RwLock<Vec<ChatEntry>>,
    ids: Arc<SnowflakeGenerator>,
}

impl MemoryMessageStore {
    pub fn new(ids: Arc<SnowflakeGenerator>) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            ids,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for MemoryMessageStore {
    fn default() -> Self {
        Self::new(Arc::new(SnowflakeGenerator::default()))
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    async fn append(&self, content: &str, author: &str) -> StoreResult<ChatEntry> {
        let mut entries = self.entries.write().await;
        let entry = ChatEntry::new(self.ids.generate(), content, author, Utc::now());
        entries.push(entry.clone());
        Ok(entry)
    }

    #[instrument(skip(self))]
    async fn recent(&self, limit: usize) -> StoreResult<Vec<ChatEntry>> {
        let entries = self.entries.read().await;
        let mut tail: Vec<ChatEntry> = entries.iter().rev().take(limit).cloned().collect();
        // Insertion order can disagree with created_at if the clock steps back.
        tail.sort_by_key(ChatEntry::chronological_key);
        Ok(tail)
    }

    #[instrument(skip(self))]
    async fn purge_all(&self) -> StoreResult<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}
