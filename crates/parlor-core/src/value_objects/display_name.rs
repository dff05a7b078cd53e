use std::fmt;

use serde::Serialize;

/// A connection's announced name, trimmed and non-blank
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DisplayName(String);

/// The candidate name was blank after trimming
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("display name must not be blank")]
pub struct InvalidDisplayName;

impl DisplayName {
    pub fn parse(raw: &str) -> Result<Self, InvalidDisplayName> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidDisplayName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
