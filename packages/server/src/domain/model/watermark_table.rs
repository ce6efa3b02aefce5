//! Per-user clear watermarks.

use std::collections::HashMap;

use crate::domain::value_object::{Timestamp, UserId};

/// Maps a user to the instant up to which messages are hidden from them.
///
/// Clearing only touches this table; the shared message log and other users'
/// views are unaffected.
#[derive(Debug, Clone, Default)]
pub struct WatermarkTable {
    marks: HashMap<UserId, Timestamp>,
}

impl WatermarkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the user's watermark to `now` and return the stored value.
    ///
    /// The stored value never decreases, even if `now` is earlier than the
    /// previous watermark.
    pub fn clear(&mut self, user_id: UserId, now: Timestamp) -> Timestamp {
        let mark = self.marks.entry(user_id).or_insert(Timestamp::EPOCH);
        if now > *mark {
            *mark = now;
        }
        *mark
    }

    /// Stored watermark, or `Timestamp::EPOCH` when the user never cleared.
    pub fn watermark_of(&self, user_id: &UserId) -> Timestamp {
        self.marks.get(user_id).copied().unwrap_or(Timestamp::EPOCH)
    }
}
