//! # parlor-service
//!
//! Application layer containing the message use cases and DTOs.
//! Both the HTTP API and the WebSocket gateway post and read chat history
//! through [`MessageService`], so validation and persistence rules live in
//! one place.

pub mod dto;
pub mod services;

pub use services::{MessageService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
