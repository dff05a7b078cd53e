//! Message validation shared by the WebSocket and HTTP surfaces

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum lengths, counted in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLimits {
    pub max_content_length: usize,
    pub max_author_length: usize,
}

impl MessageLimits {
    pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 500;
    pub const DEFAULT_MAX_AUTHOR_LENGTH: usize = 50;
}

impl Default for MessageLimits {
    fn default() -> Self {
        Self {
            max_content_length: Self::DEFAULT_MAX_CONTENT_LENGTH,
            max_author_length: Self::DEFAULT_MAX_AUTHOR_LENGTH,
        }
    }
}

/// A single violated constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyContent,
    ContentTooLong { max: usize },
    EmptyAuthor,
    AuthorTooLong { max: usize },
}

impl ValidationIssue {
    /// Field the issue belongs to
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyContent | Self::ContentTooLong { .. } => "content",
            Self::EmptyAuthor | Self::AuthorTooLong { .. } => "author",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyContent | Self::EmptyAuthor => "required",
            Self::ContentTooLong { .. } | Self::AuthorTooLong { .. } => "length",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => f.write_str("Message content cannot be empty"),
            Self::ContentTooLong { max } => {
                write!(f, "Message content cannot exceed {max} characters")
            }
            Self::EmptyAuthor => f.write_str("Username cannot be empty"),
            Self::AuthorTooLong { max } => write!(f, "Username cannot exceed {max} characters"),
        }
    }
}

/// Outcome of [`validate_message`]; issues are ordered content first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Human-readable descriptions, empty when valid
    pub fn errors(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    /// Descriptions joined with `", "`, as sent to chat clients
    pub fn joined(&self) -> String {
        self.errors().join(", ")
    }
}

/// Check a candidate message against `limits`.
///
/// Both fields are always checked so every violation is reported at once.
/// Blankness is judged after trimming; length counts characters of the
/// untrimmed text.
pub fn validate_message(
    content: Option<&str>,
    author: Option<&str>,
    limits: &MessageLimits,
) -> ValidationReport {
    let mut issues = Vec::new();

    match content {
        Some(text) if !text.trim().is_empty() => {
            if text.chars().count() > limits.max_content_length {
                issues.push(ValidationIssue::ContentTooLong {
                    max: limits.max_content_length,
                });
            }
        }
        _ => issues.push(ValidationIssue::EmptyContent),
    }

    match author {
        Some(name) if !name.trim().is_empty() => {
            if name.chars().count() > limits.max_author_length {
                issues.push(ValidationIssue::AuthorTooLong {
                    max: limits.max_author_length,
                });
            }
        }
        _ => issues.push(ValidationIssue::EmptyAuthor),
    }

    ValidationReport { issues }
}
