//! InMemory Presence Repository 実装

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DisplayName, PresenceRepository, PresenceTracker, Timestamp, UserId};

/// インメモリ Presence Repository 実装
pub struct InMemoryPresenceRepository {
    tracker: Mutex<PresenceTracker>,
}

impl InMemoryPresenceRepository {
    /// 新しい InMemoryPresenceRepository を作成
    pub fn new(tracker: PresenceTracker) -> Self {
        Self {
            tracker: Mutex::new(tracker),
        }
    }

    /// 指定したウィンドウ（ミリ秒）で空のリポジトリを作成
    pub fn with_window_millis(window_millis: i64) -> Self {
        Self::new(PresenceTracker::new(window_millis))
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn heartbeat(&self, user_id: UserId, name: DisplayName, now: Timestamp) {
        let mut tracker = self.tracker.lock().await;
        tracker.heartbeat(user_id, name, now);
    }

    async fn live_names(&self, now: Timestamp) -> Vec<DisplayName> {
        let mut tracker = self.tracker.lock().await;
        tracker.live_names(now)
    }
}
