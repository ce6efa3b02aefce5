//! HTTP API DTOs.
//!
//! Field names are camelCase on the wire (`userId`, `sentAt`, ...).

use serde::{Deserialize, Serialize};

/// Message as returned by `GET /messages` and `POST /send`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    pub user_id: String,
    pub name: String,
    pub text: String,
    pub image: Option<String>,
    /// Unix timestamp (milliseconds)
    pub sent_at: i64,
    /// Display time (`HH:MM`, JST)
    pub time: String,
}

/// Query parameters for `GET /messages`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesQuery {
    pub user_id: Option<String>,
}

/// Response body for `POST /send`
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub status: String,
    pub name: String,
    pub message: ChatMessageDto,
}

/// Request body for `POST /name`
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetNameRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
}

/// Response body for `POST /name`
#[derive(Debug, Serialize, Deserialize)]
pub struct SetNameResponse {
    /// "created" or "already_bound"
    pub status: String,
    pub name: String,
}

/// Request body for `POST /clear`
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearRequest {
    #[serde(default)]
    pub user_id: String,
}

/// Response body for `POST /clear`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub status: String,
    pub cleared_at: i64,
}

/// Request body for `POST /heartbeat`
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRequest {
    #[serde(default)]
    pub user_id: String,
    pub name: Option<String>,
}

/// Response body for `GET /online`
#[derive(Debug, Serialize, Deserialize)]
pub struct OnlineResponse {
    pub online: Vec<String>,
}

/// Generic `{"status": ...}` acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Error body: `{"status":"error","message":...}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
