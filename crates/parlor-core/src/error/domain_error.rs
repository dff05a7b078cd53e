//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::traits::StoreError;
use crate::validation::ValidationReport;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Identity Errors
    // =========================================================================
    /// Display name was missing, not text, or blank after trimming
    #[error("Invalid username")]
    InvalidIdentity,

    /// The connection already announced a display name
    #[error("Username already set for this connection")]
    IdentityAlreadySet,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// One or more content/author constraints were violated
    #[error("{}", .0.joined())]
    ValidationFailed(ValidationReport),

    // =========================================================================
    // Protocol Errors
    // =========================================================================
    /// A chat message arrived before the connection announced an identity
    #[error("must set identity first")]
    ProtocolViolation,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIdentity => "INVALID_IDENTITY",
            Self::IdentityAlreadySet => "IDENTITY_ALREADY_SET",
            Self::ValidationFailed(_) => "VALIDATION_ERROR",
            Self::ProtocolViolation => "PROTOCOL_VIOLATION",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationFailed(_) | Self::InvalidIdentity)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::IdentityAlreadySet)
    }

    /// Check if the caller broke the event protocol
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::ProtocolViolation)
    }

    /// Check if this error originated in the message store
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
