//! Message service
//!
//! Validates and persists chat messages and reads back history.

use parlor_core::{validate_message, ChatEntry};
use tracing::{debug, info, instrument, warn};

use crate::dto::{ChatEntryResponse, CreateMessageRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate and store one message.
    ///
    /// Nothing reaches the store unless every check passes.
    #[instrument(skip(self, content))]
    pub async fn post_message(
        &self,
        content: Option<&str>,
        author: Option<&str>,
    ) -> ServiceResult<ChatEntry> {
        let report = validate_message(content, author, &self.ctx.limits());
        let (Some(content), Some(author)) = (content, author) else {
            return Err(ServiceError::Validation(report));
        };
        if !report.is_valid() {
            debug!(errors = %report.joined(), "Message rejected");
            return Err(ServiceError::Validation(report));
        }

        let entry = self.ctx.store().append(content, author).await.map_err(|e| {
            warn!(error = ?e, "Failed to store message");
            ServiceError::from(e)
        })?;

        info!(entry_id = %entry.id, author = %entry.author, "Message stored");
        Ok(entry)
    }

    /// HTTP entry point for posting a message
    pub async fn create_message(
        &self,
        request: CreateMessageRequest,
    ) -> ServiceResult<ChatEntryResponse> {
        let entry = self
            .post_message(request.content.as_deref(), request.author.as_deref())
            .await?;
        Ok(ChatEntryResponse::from(entry))
    }

    /// The most recent entries, oldest first.
    ///
    /// `None` uses the configured default; explicit limits are capped.
    #[instrument(skip(self))]
    pub async fn recent_messages(&self, limit: Option<usize>) -> ServiceResult<Vec<ChatEntry>> {
        let limit = self.ctx.history_limit(limit);
        let entries = self.ctx.store().recent(limit).await.map_err(|e| {
            warn!(error = ?e, "Failed to load history");
            ServiceError::from(e)
        })?;
        Ok(entries)
    }

    /// History in response form, with colours
    pub async fn history(&self, limit: Option<usize>) -> ServiceResult<Vec<ChatEntryResponse>> {
        let entries = self.recent_messages(limit).await?;
        Ok(entries.into_iter().map(ChatEntryResponse::from).collect())
    }

    /// Remove all history. Test utility.
    #[instrument(skip(self))]
    pub async fn purge_all(&self) -> ServiceResult<()> {
        self.ctx.store().purge_all().await?;
        info!("Chat history purged");
        Ok(())
    }

    /// Whether the store answers a round trip
    pub async fn is_ready(&self) -> bool {
        match self.ctx.store().ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = ?e, "Message store not ready");
                false
            }
        }
    }
}
