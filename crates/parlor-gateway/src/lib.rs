//! # parlor-gateway
//!
//! WebSocket gateway for the chat room: identity announcement, history
//! replay, live message fan-out and the two shared widgets.

pub mod broadcast;
pub mod connection;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod widgets;

pub use server::{create_app, create_gateway_state, run, serve, GatewayState};
