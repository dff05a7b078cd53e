//! Handler error types

use crate::widgets::CanvasError;
use parlor_core::{DomainError, ValidationReport};
use parlor_service::ServiceError;
use thiserror::Error;

/// Handler error type
///
/// Every variant ends up as exactly one private `error` event for the
/// connection that caused it; none of them closes the socket.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Frame is not a JSON `{event, data}` object
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    /// Binary frames carry nothing we understand
    #[error("Binary frames are not supported")]
    UnsupportedFrame,

    /// Event name is not a client event
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// Invalid payload received
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid username")]
    InvalidIdentity,

    #[error("Username already set for this connection")]
    IdentityAlreadySet,

    /// Chat attempted before `set username`
    #[error("must set identity first")]
    NotIdentified,

    /// Message failed validation
    #[error("{}", .0.joined())]
    Validation(ValidationReport),

    /// Store rejected a chat message
    #[error("send failed")]
    SendFailed(#[source] ServiceError),

    /// Store could not produce history
    #[error("failed to load history")]
    HistoryUnavailable(#[source] ServiceError),

    #[error("Invalid pixel: {0}")]
    InvalidPixel(#[from] CanvasError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Text sent to the client in the `error` event
    pub fn client_message(&self) -> String {
        match self {
            Self::MalformedFrame(_) => "Invalid message format".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Classify a failed chat post
    pub fn from_post(err: ServiceError) -> Self {
        if let Some(report) = err.validation_report() {
            Self::Validation(report.clone())
        } else if err.is_store() {
            Self::SendFailed(err)
        } else {
            Self::Internal(err.to_string())
        }
    }

    /// Whether this points at a server-side fault rather than a bad request
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::SendFailed(_) | Self::HistoryUnavailable(_) | Self::Internal(_)
        )
    }
}

impl From<DomainError> for HandlerError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidIdentity => Self::InvalidIdentity,
            DomainError::IdentityAlreadySet => Self::IdentityAlreadySet,
            DomainError::ProtocolViolation => Self::NotIdentified,
            DomainError::ValidationFailed(report) => Self::Validation(report),
            DomainError::Store(e) => Self::Internal(e.to_string()),
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
