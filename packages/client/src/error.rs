//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (server unreachable, broken response, ...)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server answered with an error status
    #[error("Server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Local file could not be read (e.g. `/image` path)
    #[error("Failed to read '{path}': {reason}")]
    FileRead { path: String, reason: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        Self::ConnectionError(error.to_string())
    }
}
