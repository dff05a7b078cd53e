//! History handler (`get history`)

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::protocol::GatewayMessage;
use crate::server::GatewayState;
use parlor_service::MessageService;
use std::sync::Arc;

/// Handles `get history`
pub struct HistoryHandler;

impl HistoryHandler {
    /// Reply privately with the latest `limit` entries, oldest first
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        limit: Option<usize>,
    ) -> HandlerResult<()> {
        let history = MessageService::new(state.service_context())
            .history(limit)
            .await
            .map_err(HandlerError::HistoryUnavailable)?;

        connection.deliver(GatewayMessage::chat_history(&history));

        Ok(())
    }
}
