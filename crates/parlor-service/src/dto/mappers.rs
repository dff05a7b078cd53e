//! Domain type to DTO mappers

use std::borrow::Cow;

use parlor_core::{username_color, ChatEntry, ValidationReport};
use validator::{ValidationError, ValidationErrors};

use super::responses::ChatEntryResponse;

impl From<ChatEntry> for ChatEntryResponse {
    fn from(entry: ChatEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            color: username_color(&entry.author),
            content: entry.content,
            author: entry.author,
            created_at: entry.created_at,
        }
    }
}

/// Per-field error map for HTTP 400 bodies
pub fn validation_errors(report: &ValidationReport) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for issue in report.issues() {
        let mut error = ValidationError::new(issue.code());
        error.message = Some(Cow::Owned(issue.to_string()));
        errors.add(issue.field(), error);
    }
    errors
}
