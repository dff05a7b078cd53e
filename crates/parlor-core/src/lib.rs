//! # parlor-core
//!
//! Domain layer containing the chat entry entity, message validation, the
//! username colour palette, and the message store contract.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::ChatEntry;
pub use error::DomainError;
pub use traits::{MessageStore, StoreError, StoreResult};
pub use validation::{validate_message, MessageLimits, ValidationIssue, ValidationReport};
pub use value_objects::{
    username_color, DisplayName, InvalidDisplayName, Snowflake, SnowflakeGenerator,
    SnowflakeParseError, USERNAME_COLORS,
};
