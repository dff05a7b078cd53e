//! Message store port - the persistence contract the broadcast core relies on

use std::error::Error as StdError;

use async_trait::async_trait;

use crate::entities::ChatEntry;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A store operation failed; the cause is kept for logs only
#[derive(Debug, thiserror::Error)]
#[error("message store failed during {operation}")]
pub struct StoreError {
    operation: &'static str,
    #[source]
    source: Box<dyn StdError + Send + Sync + 'static>,
}

impl StoreError {
    pub fn new<E>(operation: &'static str, source: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self {
            operation,
            source: source.into(),
        }
    }

    /// Name of the store operation that failed (`append`, `recent`, ...)
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// Durable chat history
///
/// Implementations assign `id` and `created_at` on append and never mutate an
/// entry afterwards.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Store one already-validated entry
    async fn append(&self, content: &str, author: &str) -> StoreResult<ChatEntry>;

    /// The most recent `limit` entries, oldest first
    ///
    /// Entries sharing a `created_at` are ordered by id.
    async fn recent(&self, limit: usize) -> StoreResult<Vec<ChatEntry>>;

    /// Remove every entry. Test utility.
    async fn purge_all(&self) -> StoreResult<()>;

    /// Cheap round trip used by readiness probes
    async fn ping(&self) -> StoreResult<()> {
        self.recent(1).await.map(|_| ())
    }
}
