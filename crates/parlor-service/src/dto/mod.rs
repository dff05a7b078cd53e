//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain types to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use mappers::validation_errors;
pub use requests::{CreateMessageRequest, HistoryQuery};
pub use responses::{ChatEntryResponse, HealthChecks, HealthResponse, ReadinessResponse};
