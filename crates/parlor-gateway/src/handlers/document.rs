//! Collaborative document handlers (`collabdoc get`, `collabdoc update`)

use crate::connection::Connection;
use crate::protocol::{DocumentUpdatePayload, GatewayMessage};
use crate::server::GatewayState;
use std::sync::Arc;

/// Handles shared document events
pub struct DocumentHandler;

impl DocumentHandler {
    /// Send the current text to this connection
    pub fn snapshot(state: &GatewayState, connection: &Arc<Connection>) {
        connection.deliver(GatewayMessage::document_init(state.document().text()));
    }

    /// Replace the text and forward the edit to everyone else
    pub fn update(
        state: &GatewayState,
        connection: &Arc<Connection>,
        update: &DocumentUpdatePayload,
    ) {
        state.document().replace(update, |update| {
            state.event_dispatcher().broadcast_except(
                connection.session_id(),
                &GatewayMessage::document_update(update),
            );
        });
    }
}
