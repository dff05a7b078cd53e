//! Chat message handler (`chat message`)

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::server::GatewayState;
use std::sync::Arc;

/// Handles `chat message`
pub struct ChatHandler;

impl ChatHandler {
    /// Validate, store and fan out one message
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        text: Option<&str>,
    ) -> HandlerResult<()> {
        let Some(author) = connection.current_identity().await else {
            tracing::debug!(
                session_id = %connection.session_id(),
                "Chat message before identity"
            );
            return Err(HandlerError::NotIdentified);
        };

        let entry = state
            .event_dispatcher()
            .post_chat_message(state.service_context(), text, &author)
            .await
            .map_err(HandlerError::from_post)?;

        tracing::debug!(
            session_id = %connection.session_id(),
            entry_id = %entry.id,
            "Chat message accepted"
        );

        Ok(())
    }
}
