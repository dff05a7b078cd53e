//! Connection management
//!
//! Tracks live WebSocket connections and each one's presence record.

mod connection;
mod manager;

pub use connection::Connection;
pub use manager::ConnectionManager;
