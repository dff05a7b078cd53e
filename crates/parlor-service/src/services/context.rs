//! Service context - dependency container for services

use std::sync::Arc;

use parlor_common::ChatConfig;
use parlor_core::{MessageLimits, MessageStore};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every surface holds one and hands `&ServiceContext` to the
/// services it builds per request or per event.
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn MessageStore>,
    chat: ChatConfig,
}

impl ServiceContext {
    pub fn new(store: Arc<dyn MessageStore>, chat: ChatConfig) -> Self {
        Self { store, chat }
    }

    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the message store
    pub fn store(&self) -> &dyn MessageStore {
        self.store.as_ref()
    }

    pub fn chat_config(&self) -> &ChatConfig {
        &self.chat
    }

    pub fn limits(&self) -> MessageLimits {
        self.chat.limits()
    }

    /// History size to fetch for a request: the configured default when
    /// absent, otherwise capped at `history_max_limit`. Zero stays zero.
    pub fn history_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.chat.history_limit)
            .min(self.chat.history_max_limit)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &"dyn MessageStore")
            .field("chat", &self.chat)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn MessageStore>>,
    chat: Option<ChatConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn MessageStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn chat_config(mut self, chat: ChatConfig) -> Self {
        self.chat = Some(chat);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if the store is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::internal("store is required"))?,
            self.chat.unwrap_or_default(),
        ))
    }
}
