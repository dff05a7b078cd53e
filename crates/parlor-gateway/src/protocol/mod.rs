//! Gateway protocol definitions
//!
//! Every frame is a JSON text frame of the form `{"event": <name>, "data": <payload>}`.

mod messages;
mod payloads;

pub use messages::GatewayMessage;
pub use payloads::{DocumentUpdatePayload, PixelPayload};
