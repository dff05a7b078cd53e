//! Request DTOs for API endpoints
//!
//! Fields are optional so that missing values reach message validation and are
//! reported together with every other violation.

use serde::Deserialize;

/// Post message request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub content: Option<String>,

    /// Older clients send the name as `pseudo`
    #[serde(default, alias = "pseudo")]
    pub author: Option<String>,
}

/// `?limit=` query for history reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// Kept raw: unparseable values fall back to the default
    #[serde(default)]
    pub limit: Option<String>,
}

impl HistoryQuery {
    /// Requested size; zero and unparseable values mean "use the default"
    pub fn limit(&self) -> Option<usize> {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .filter(|&limit| limit > 0)
    }
}
