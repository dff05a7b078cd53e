//! Pixel canvas handlers (`rplace get`, `rplace pixel`)

use super::HandlerResult;
use crate::connection::Connection;
use crate::protocol::{GatewayMessage, PixelPayload};
use crate::server::GatewayState;
use std::sync::Arc;

/// Handles pixel canvas events
pub struct CanvasHandler;

impl CanvasHandler {
    /// Send the whole grid to this connection
    pub fn snapshot(state: &GatewayState, connection: &Arc<Connection>) {
        connection.deliver(GatewayMessage::canvas_grid(&state.canvas().snapshot()));
    }

    /// Paint one cell and show it to everyone, painter included
    pub fn paint(state: &GatewayState, pixel: &PixelPayload) -> HandlerResult<()> {
        state.canvas().paint(pixel, |pixel| {
            state
                .event_dispatcher()
                .broadcast(&GatewayMessage::canvas_pixel(pixel));
        })?;

        tracing::trace!(idx = pixel.idx, user = %pixel.user, "Pixel painted");
        Ok(())
    }
}
