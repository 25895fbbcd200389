//! Identifier shared by every backend record.

use std::fmt;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Validation errors returned by [`ResourceId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceIdValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("id must not be empty")]
    Empty,
    /// Identifier carries leading or trailing whitespace.
    #[error("id must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Identifier of a record held by the REST backend.
///
/// The gateway never interprets identifiers; it only forwards them. Backends
/// disagree on whether ids are JSON strings or integers, so decoding accepts
/// both and keeps the string form.
///
/// # Examples
/// ```
/// use gateway::domain::ResourceId;
///
/// let id = ResourceId::new("23").expect("valid id");
/// assert_eq!(id.as_str(), "23");
/// assert!(ResourceId::new(" 23").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    /// Validate and construct an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, ResourceIdValidationError> {
        let raw = id.into();
        if raw.trim().is_empty() {
            return Err(ResourceIdValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(ResourceIdValidationError::SurroundingWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawResourceId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match RawResourceId::deserialize(deserializer)? {
            RawResourceId::Text(text) => text,
            RawResourceId::Signed(number) => number.to_string(),
            RawResourceId::Unsigned(number) => number.to_string(),
        };
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
