//! Client payload definitions
//!
//! Structured payloads carried by client events. The widget payloads are
//! echoed back to other clients unchanged, so they serialize too.

use serde::{Deserialize, Serialize};

/// Payload for `rplace pixel`
///
/// `idx` is a row-major cell index. Negative or fractional indices fail to
/// deserialize; the range check against the grid happens in the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPayload {
    pub idx: usize,
    pub color: String,
    pub user: String,
}

/// Payload for `collabdoc update`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpdatePayload {
    pub text: String,
    /// Who typed it; anonymous edits are allowed
    #[serde(default)]
    pub user: String,
}
