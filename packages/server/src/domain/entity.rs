//! Entities.

use kairan_shared::time::timestamp_to_jst_hhmm;

use super::value_object::{DisplayName, ImageRef, Timestamp, UserId};

/// A message as submitted, before the message log stamps it.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDraft {
    pub user_id: UserId,
    pub name: DisplayName,
    pub text: String,
    pub image: Option<ImageRef>,
    /// Send time chosen by the caller; the log assigns one when absent.
    pub sent_at: Option<Timestamp>,
}

impl MessageDraft {
    pub fn new(user_id: UserId, name: DisplayName, text: String, image: Option<ImageRef>) -> Self {
        Self {
            user_id,
            name,
            text,
            image,
            sent_at: None,
        }
    }
}

/// A retained chat message. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub user_id: UserId,
    pub name: DisplayName,
    pub text: String,
    pub image: Option<ImageRef>,
    pub sent_at: Timestamp,
}

impl ChatMessage {
    /// Stamp a draft, keeping its own `sent_at` if it carries one.
    pub fn from_draft(draft: MessageDraft, received_at: Timestamp) -> Self {
        Self {
            user_id: draft.user_id,
            name: draft.name,
            text: draft.text,
            image: draft.image,
            sent_at: draft.sent_at.unwrap_or(received_at),
        }
    }

    /// `HH:MM` in the fixed display timezone.
    pub fn display_time(&self) -> String {
        timestamp_to_jst_hhmm(self.sent_at.value())
    }
}

/// Outcome of a set-once name binding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindStatus {
    /// No binding existed; the requested name is now bound.
    Created,
    /// A binding already existed and was left untouched.
    AlreadyBound,
}

impl BindStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindStatus::Created => "created",
            BindStatus::AlreadyBound => "already_bound",
        }
    }
}

/// Result of `try_set`: the status and the authoritative bound name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameBinding {
    pub status: BindStatus,
    pub name: DisplayName,
}

/// Last heartbeat seen from a user.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceEntry {
    pub user_id: UserId,
    pub name: DisplayName,
    pub last_seen: Timestamp,
}
