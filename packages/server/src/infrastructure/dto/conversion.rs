//! Conversion logic between domain entities and DTOs.

use crate::domain::{ChatMessage, NameBinding};
use crate::infrastructure::dto::http as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatMessage> for dto::ChatMessageDto {
    fn from(model: ChatMessage) -> Self {
        let time = model.display_time();
        Self {
            user_id: model.user_id.into_string(),
            name: model.name.into_string(),
            text: model.text,
            image: model.image.map(|image| image.into_string()),
            sent_at: model.sent_at.value(),
            time,
        }
    }
}

impl From<NameBinding> for dto::SetNameResponse {
    fn from(binding: NameBinding) -> Self {
        Self {
            status: binding.status.as_str().to_string(),
            name: binding.name.into_string(),
        }
    }
}
