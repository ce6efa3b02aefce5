//! Value objects.
//!
//! Constructors validate their input once, so everything downstream can rely
//! on a `UserId` or `DisplayName` being non-blank.

use std::fmt;

use super::error::ValueObjectError;

/// Number of leading `userId` characters used in generated fallback names.
const FALLBACK_NAME_PREFIX_LEN: usize = 6;

/// Client-chosen identifier. Opaque to the server; only blankness is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyUserId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Generated display name for users who never chose one: `Anon-` followed
    /// by the first six characters of the identifier.
    pub fn fallback_name(&self) -> DisplayName {
        let prefix: String = self.0.chars().take(FALLBACK_NAME_PREFIX_LEN).collect();
        DisplayName(format!("Anon-{prefix}"))
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human-readable name shown next to messages and in the online list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// Trims surrounding whitespace; rejects names that are blank.
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyDisplayName);
        }
        if trimmed.len() == value.len() {
            Ok(Self(value))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Optional name hint: `None`, empty and blank strings all mean "no hint".
    pub fn from_hint(hint: Option<String>) -> Option<Self> {
        hint.and_then(|value| Self::new(value).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    /// "No watermark": every retained message is newer than this.
    pub const EPOCH: Timestamp = Timestamp(0);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Reference to a stored attachment (e.g. `/uploads/1700000000000-42.png`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyImageRef);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
