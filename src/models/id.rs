//! Record identifiers.
//!
//! Ids are generated server-side as hyphenated UUID v4 strings. Lookups accept
//! any well-formed id so that unknown ids resolve to "not found" rather than
//! "bad request".

use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum accepted id length.
pub const MAX_ID_LEN: usize = 64;

/// A validated record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Parse and validate an id taken from a request path.
    pub fn parse(raw: &str) -> Result<Self, InvalidId> {
        if raw.is_empty() {
            return Err(InvalidId::Empty);
        }
        if raw.len() > MAX_ID_LEN {
            return Err(InvalidId::TooLong(raw.len()));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(InvalidId::InvalidCharacters);
        }
        Ok(Self(raw.to_string()))
    }

    /// Generate a fresh id for a record about to be inserted.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RecordId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reasons an id fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidId {
    #[error("id cannot be empty")]
    Empty,

    #[error("id is {0} characters long, maximum is {MAX_ID_LEN}")]
    TooLong(usize),

    #[error("id may only contain ASCII letters, digits, '-' and '_'")]
    InvalidCharacters,
}
