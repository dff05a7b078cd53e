//! Gateway events
//!
//! Names and payloads of every event exchanged over the socket.

mod event_types;
mod payloads;

pub use event_types::{ClientEvent, ServerEvent};
pub use payloads::{ChatMessagePayload, DocumentInitPayload, PresencePayload};
