//! Presence handler (disconnect)

use crate::protocol::GatewayMessage;
use crate::server::GatewayState;

/// Handles connection teardown
pub struct PresenceHandler;

impl PresenceHandler {
    /// Drop the connection from the room and announce the departure if it
    /// had a name
    pub async fn disconnect(state: &GatewayState, session_id: &str) {
        let Some(connection) = state.connection_manager().remove_connection(session_id) else {
            return;
        };

        if let Some(name) = connection.current_identity().await {
            state
                .event_dispatcher()
                .broadcast(&GatewayMessage::user_left(&name));

            tracing::info!(
                session_id = %session_id,
                username = %name,
                connected_for_ms = connection.age().as_millis() as u64,
                "User left"
            );
        }
    }
}
