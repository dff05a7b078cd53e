//! Event broadcasting
//!
//! Distributes chat entries and widget updates to WebSocket connections.

mod dispatcher;

pub use dispatcher::EventDispatcher;
