//! Time-windowed presence tracking with lazy expiry.

use crate::domain::{
    entity::PresenceEntry,
    value_object::{DisplayName, Timestamp, UserId},
};

/// Default liveness window (30 seconds).
pub const DEFAULT_LIVENESS_WINDOW_MILLIS: i64 = 30_000;

/// Tracks the last heartbeat of every user.
///
/// Entries are never expired on a timer. `live_names` sweeps stale entries as
/// a side effect of reading, so staleness is bounded only by how often the
/// online list is requested.
#[derive(Debug, Clone)]
pub struct PresenceTracker {
    // Vec keeps first-heartbeat order across refreshes.
    entries: Vec<PresenceEntry>,
    window_millis: i64,
}

impl PresenceTracker {
    /// Create a tracker. Negative windows are treated as zero.
    pub fn new(window_millis: i64) -> Self {
        Self {
            entries: Vec::new(),
            window_millis: window_millis.max(0),
        }
    }

    /// Record a heartbeat: refresh an existing entry in place or append a new one.
    pub fn heartbeat(&mut self, user_id: UserId, name: DisplayName, now: Timestamp) {
        match self.entries.iter_mut().find(|entry| entry.user_id == user_id) {
            Some(entry) => {
                entry.name = name;
                entry.last_seen = now;
            }
            None => self.entries.push(PresenceEntry {
                user_id,
                name,
                last_seen: now,
            }),
        }
    }

    /// Drop every entry silent for longer than the window, then return the
    /// names of the survivors in insertion order.
    ///
    /// Names are not deduplicated: two users sharing a name both appear.
    pub fn live_names(&mut self, now: Timestamp) -> Vec<DisplayName> {
        let window = self.window_millis;
        self.entries
            .retain(|entry| now.value().saturating_sub(entry.last_seen.value()) <= window);
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    #[cfg(test)]
    pub fn window_millis(&self) -> i64 {
        self.window_millis
    }

    /// Number of tracked entries, including ones not yet swept.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new(DEFAULT_LIVENESS_WINDOW_MILLIS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    fn names(list: Vec<DisplayName>) -> Vec<String> {
        list.into_iter().map(DisplayName::into_string).collect()
    }

    #[test]
    fn test_heartbeat_then_live_names() {
        // テスト項目: heartbeat 直後の live_names にその名前が含まれる
        // given (前提条件):
        let mut tracker = PresenceTracker::new(30_000);

        // when (操作):
        tracker.heartbeat(user("u2"), name("Bob"), Timestamp::new(1_000));
        let result = tracker.live_names(Timestamp::new(1_000));

        // then (期待する結果):
        assert_eq!(names(result), vec!["Bob"]);
    }

    #[test]
    fn test_entry_within_window_survives() {
        // テスト項目: ちょうどウィンドウ境界の経過時間ではまだオンライン
        // given (前提条件):
        let mut tracker = PresenceTracker::new(30_000);
        tracker.heartbeat(user("u2"), name("Bob"), Timestamp::new(1_000));

        // when (操作):
        let result = tracker.live_names(Timestamp::new(31_000));

        // then (期待する結果):
        assert_eq!(names(result), vec!["Bob"]);
    }

    #[test]
    fn test_expired_entry_is_swept_and_stays_removed() {
        // テスト項目: ウィンドウを超えたエントリは読み取り時に削除され、削除が永続する
        // given (前提条件):
        let mut tracker = PresenceTracker::new(30_000);
        tracker.heartbeat(user("u2"), name("Bob"), Timestamp::new(1_000));

        // when (操作):
        let first = tracker.live_names(Timestamp::new(31_001));

        // then (期待する結果):
        assert!(first.is_empty());
        assert!(tracker.is_empty());

        // 時計が戻っても復活しない（エントリ自体が消えている）
        let second = tracker.live_names(Timestamp::new(1_000));
        assert!(second.is_empty());
    }

    #[test]
    fn test_expiry_only_happens_on_read() {
        // テスト項目: 読み取りが行われるまで期限切れのエントリは残る（遅延削除）
        // given (前提条件):
        let mut tracker = PresenceTracker::new(30_000);
        tracker.heartbeat(user("u1"), name("Alice"), Timestamp::new(0));

        // when (操作): 期限切れ後に別ユーザーが heartbeat
        tracker.heartbeat(user("u2"), name("Bob"), Timestamp::new(60_000));

        // then (期待する結果): まだ 2 件保持されている
        assert_eq!(tracker.len(), 2);
        assert_eq!(names(tracker.live_names(Timestamp::new(60_000))), vec!["Bob"]);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_refresh_keeps_position_and_updates_name() {
        // テスト項目: 再 heartbeat は位置を保ったまま時刻と名前を更新する
        // given (前提条件):
        let mut tracker = PresenceTracker::new(30_000);
        tracker.heartbeat(user("u1"), name("Alice"), Timestamp::new(0));
        tracker.heartbeat(user("u2"), name("Bob"), Timestamp::new(10_000));

        // when (操作): u1 が名前付きで再 heartbeat
        tracker.heartbeat(user("u1"), name("Alice2"), Timestamp::new(35_000));
        let result = tracker.live_names(Timestamp::new(35_000));

        // then (期待する結果): 挿入順は維持される
        assert_eq!(names(result), vec!["Alice2", "Bob"]);
    }

    #[test]
    fn test_duplicate_names_are_not_merged() {
        // テスト項目: 別ユーザーが同じ名前でもどちらも返される
        // given (前提条件):
        let mut tracker = PresenceTracker::new(30_000);
        tracker.heartbeat(user("u1"), name("Sam"), Timestamp::new(0));
        tracker.heartbeat(user("u2"), name("Sam"), Timestamp::new(0));

        // when (操作):
        let result = tracker.live_names(Timestamp::new(0));

        // then (期待する結果):
        assert_eq!(names(result), vec!["Sam", "Sam"]);
    }

    #[test]
    fn test_negative_window_is_zero() {
        // テスト項目: 負のウィンドウは 0 として扱われる
        // then (期待する結果):
        assert_eq!(PresenceTracker::new(-5).window_millis(), 0);
        assert_eq!(
            PresenceTracker::default().window_millis(),
            DEFAULT_LIVENESS_WINDOW_MILLIS
        );
    }
}
