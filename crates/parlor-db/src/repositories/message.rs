//! PostgreSQL implementation of MessageStore

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use parlor_core::{ChatEntry, MessageStore, SnowflakeGenerator, StoreResult};

use crate::models::ChatEntryModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageStore
#[derive(Clone)]
pub struct PgMessageStore {
    pool: PgPool,
    ids: Arc<SnowflakeGenerator>,
}

impl PgMessageStore {
    /// Create a new PgMessageStore
    pub fn new(pool: PgPool, ids: Arc<SnowflakeGenerator>) -> Self {
        Self { pool, ids }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    async fn append(&self, content: &str, author: &str) -> StoreResult<ChatEntry> {
        let id = self.ids.generate();

        let model = sqlx::query_as::<_, ChatEntryModel>(
            r#"
            INSERT INTO chat_entries (id, content, author)
            VALUES ($1, $2, $3)
            RETURNING id, content, author, created_at
            "#,
        )
        .bind(id.into_inner())
        .bind(content)
        .bind(author)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("append"))?;

        Ok(ChatEntry::from(model))
    }

    #[instrument(skip(self))]
    async fn recent(&self, limit: usize) -> StoreResult<Vec<ChatEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        // Newest first so LIMIT keeps the tail, then flip to chronological.
        let mut rows = sqlx::query_as::<_, ChatEntryModel>(
            r#"
            SELECT id, content, author, created_at
            FROM chat_entries
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error("recent"))?;

        rows.reverse();
        Ok(rows.into_iter().map(ChatEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn purge_all(&self) -> StoreResult<()> {
        sqlx::query("DELETE FROM chat_entries")
            .execute(&self.pool)
            .await
            .map_err(map_db_error("purge_all"))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error("ping"))?;

        Ok(())
    }
}
