//! Identify handler (`set username`)

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::protocol::GatewayMessage;
use crate::server::GatewayState;
use parlor_service::MessageService;
use std::sync::Arc;

/// Handles `set username`
pub struct IdentifyHandler;

impl IdentifyHandler {
    /// Record the name, replay history to this connection, then tell
    /// everyone else who joined.
    ///
    /// If history cannot be loaded the name stays set but nobody is told
    /// about the join.
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        name: Option<&str>,
    ) -> HandlerResult<()> {
        let name = connection.set_identity(name).await.map_err(|e| {
            tracing::debug!(
                session_id = %connection.session_id(),
                error = %e,
                "Identity rejected"
            );
            HandlerError::from(e)
        })?;

        tracing::info!(
            session_id = %connection.session_id(),
            username = %name,
            "User identified"
        );

        let history = MessageService::new(state.service_context())
            .history(None)
            .await
            .map_err(HandlerError::HistoryUnavailable)?;

        connection.deliver(GatewayMessage::chat_history(&history));
        state
            .event_dispatcher()
            .broadcast_except(connection.session_id(), &GatewayMessage::user_joined(&name));

        Ok(())
    }
}
