//! Domain error types.

use thiserror::Error;

/// Validation errors raised when constructing value objects.
///
/// Every variant is an invalid-argument failure: the caller supplied a
/// missing or empty value where one is required.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// `userId` was missing or blank
    #[error("userId required")]
    EmptyUserId,

    /// Display name was missing or blank where one is mandatory
    #[error("name required")]
    EmptyDisplayName,

    /// Attachment reference was blank
    #[error("image reference must not be empty")]
    EmptyImageRef,
}

/// Attachment storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The payload could not be written to the backing store
    #[error("failed to store attachment: {0}")]
    WriteFailed(String),

    /// No unused file name could be generated
    #[error("could not allocate a unique attachment name after {0} attempts")]
    NameExhausted(u32),
}
