//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Multipart, Query, State,
        multipart::MultipartError,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::Attachment,
    infrastructure::dto::http::{
        ChatMessageDto, ClearRequest, ClearResponse, ErrorResponse, HeartbeatRequest,
        MessagesQuery, OnlineResponse, SendMessageResponse, SetNameRequest, SetNameResponse,
        StatusResponse,
    },
    ui::state::AppState,
    usecase::{
        ClearMessagesError, HeartbeatError, SendMessageError, SendMessageInput, SetNameError,
    },
};

/// Error response: status code plus `{"status":"error","message":...}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

impl From<SendMessageError> for ApiError {
    fn from(error: SendMessageError) -> Self {
        match error {
            SendMessageError::InvalidArgument(e) => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
            SendMessageError::AttachmentFailed(e) => {
                tracing::error!("Attachment storage failed: {}", e);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to store image")
            }
        }
    }
}

impl From<SetNameError> for ApiError {
    fn from(error: SetNameError) -> Self {
        match error {
            SetNameError::InvalidArgument(e) => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
        }
    }
}

impl From<ClearMessagesError> for ApiError {
    fn from(error: ClearMessagesError) -> Self {
        match error {
            ClearMessagesError::InvalidArgument(e) => {
                Self::new(StatusCode::BAD_REQUEST, e.to_string())
            }
        }
    }
}

impl From<HeartbeatError> for ApiError {
    fn from(error: HeartbeatError) -> Self {
        match error {
            HeartbeatError::InvalidArgument(e) => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        Self::new(error.status(), error.body_text())
    }
}

/// Read the `/send` multipart form.
///
/// Fields: `userId`, `text`, `name` and an optional `image` file. An `image`
/// part with no content (an empty file input) counts as no attachment.
async fn read_send_form(multipart: &mut Multipart) -> Result<SendMessageInput, MultipartError> {
    let mut input = SendMessageInput::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };
        match field_name.as_str() {
            "userId" => input.user_id = field.text().await?,
            "text" => input.text = Some(field.text().await?),
            "name" => input.name = Some(field.text().await?),
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    input.attachment = Some(Attachment {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            other => tracing::debug!("Ignoring unknown form field '{}'", other),
        }
    }

    Ok(input)
}

/// `POST /send`: append a message (multipart form)
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let input = read_send_form(&mut multipart).await?;
    let message = state.send_message_usecase.execute(input).await?;

    tracing::info!("Message received from '{}'", message.user_id);

    let name = message.name.as_str().to_string();
    Ok(Json(SendMessageResponse {
        status: "ok".to_string(),
        name,
        message: message.into(),
    }))
}

/// `GET /messages?userId=...`: messages visible to the caller
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessagesQuery>,
) -> Json<Vec<ChatMessageDto>> {
    let messages = state.get_messages_usecase.execute(query.user_id).await;

    // Domain Model から DTO への変換
    Json(messages.into_iter().map(ChatMessageDto::from).collect())
}

/// `POST /name`: set-once display name
pub async fn set_name(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetNameRequest>,
) -> Result<Json<SetNameResponse>, ApiError> {
    let binding = state
        .set_name_usecase
        .execute(request.user_id, request.name)
        .await?;
    Ok(Json(binding.into()))
}

/// `POST /clear`: reset the caller's personal view
pub async fn clear_messages(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ClearRequest>,
) -> Result<Json<ClearResponse>, ApiError> {
    let watermark = state
        .clear_messages_usecase
        .execute(request.user_id)
        .await?;
    Ok(Json(ClearResponse {
        status: "ok".to_string(),
        cleared_at: watermark.value(),
    }))
}

/// `POST /heartbeat`: mark the caller as online
pub async fn heartbeat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HeartbeatRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .heartbeat_usecase
        .execute(request.user_id, request.name)
        .await?;
    Ok(Json(StatusResponse {
        status: "ok".to_string(),
    }))
}

/// `GET /online`: names of users seen within the liveness window
pub async fn list_online(State(state): State<Arc<AppState>>) -> Json<OnlineResponse> {
    let names = state.list_online_usecase.execute().await;
    Json(OnlineResponse {
        online: names.into_iter().map(|name| name.into_string()).collect(),
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
