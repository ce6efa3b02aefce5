//! Capacity-bounded, append-only message log.

use std::collections::VecDeque;

use crate::domain::{
    entity::{ChatMessage, MessageDraft},
    value_object::Timestamp,
};

/// Default number of retained messages.
pub const DEFAULT_MESSAGE_CAPACITY: usize = 100;

/// Append-only log that keeps the `capacity` most recent messages.
///
/// Eviction is purely size-based: the oldest entry goes first once the log
/// is full, regardless of age, content or sender. There is no update or
/// delete operation.
#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl MessageLog {
    /// Create an empty log. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a draft at the tail and evict from the head down to capacity.
    ///
    /// Returns the stored message.
    pub fn append(&mut self, draft: MessageDraft, received_at: Timestamp) -> ChatMessage {
        let message = ChatMessage::from_draft(draft, received_at);
        self.messages.push_back(message.clone());
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
        message
    }

    /// Snapshot of every retained message with `sent_at > since`, oldest first.
    pub fn query(&self, since: Timestamp) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .filter(|message| message.sent_at > since)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{DisplayName, UserId};

    fn draft(text: &str) -> MessageDraft {
        MessageDraft::new(
            UserId::new("u1".to_string()).unwrap(),
            DisplayName::new("Alice".to_string()).unwrap(),
            text.to_string(),
            None,
        )
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        // テスト項目: 追加した順序でメッセージが取得できる
        // given (前提条件):
        let mut log = MessageLog::new(10);
        assert!(log.is_empty());

        // when (操作):
        log.append(draft("one"), Timestamp::new(1));
        log.append(draft("two"), Timestamp::new(2));
        log.append(draft("three"), Timestamp::new(3));

        // then (期待する結果):
        let texts: Vec<String> = log.query(Timestamp::EPOCH).into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert!(!log.is_empty());
    }

    #[test]
    fn test_append_beyond_capacity_evicts_oldest_first() {
        // テスト項目: 容量を超えると最も古いメッセージから削除される
        // given (前提条件):
        let capacity = 3;
        let mut log = MessageLog::new(capacity);

        // when (操作): 容量より 4 件多く追加する
        for i in 0..7 {
            log.append(draft(&format!("m{i}")), Timestamp::new(i + 1));
        }

        // then (期待する結果): 直近 3 件だけが古い順に残る
        let texts: Vec<String> = log.query(Timestamp::EPOCH).into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["m4", "m5", "m6"]);
        assert_eq!(log.len(), capacity);
    }

    #[test]
    fn test_capacity_101_messages_into_100() {
        // テスト項目: 容量 100 に 101 件送ると先頭は 2 件目のメッセージになる
        // given (前提条件):
        let mut log = MessageLog::new(100);

        // when (操作):
        for i in 1..=101 {
            log.append(draft(&format!("msg-{i}")), Timestamp::new(i));
        }

        // then (期待する結果):
        let messages = log.query(Timestamp::EPOCH);
        assert_eq!(messages.len(), 100);
        assert_eq!(messages[0].text, "msg-2");
        assert_eq!(messages[99].text, "msg-101");
    }

    #[test]
    fn test_old_messages_within_capacity_are_retained() {
        // テスト項目: 容量内であれば古いメッセージも時間経過で消えない
        // given (前提条件):
        let mut log = MessageLog::new(10);
        log.append(draft("ancient"), Timestamp::new(1));

        // when (操作): はるか後の時刻にメッセージを追加
        log.append(draft("recent"), Timestamp::new(10_000_000_000));

        // then (期待する結果):
        assert_eq!(log.len(), 2);
        assert_eq!(log.query(Timestamp::EPOCH)[0].text, "ancient");
    }

    #[test]
    fn test_query_since_is_exclusive() {
        // テスト項目: query は since より厳密に新しいメッセージのみを返す
        // given (前提条件):
        let mut log = MessageLog::new(10);
        log.append(draft("before"), Timestamp::new(100));
        log.append(draft("at"), Timestamp::new(200));
        log.append(draft("after"), Timestamp::new(300));

        // when (操作):
        let result = log.query(Timestamp::new(200));

        // then (期待する結果):
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "after");
    }

    #[test]
    fn test_query_does_not_mutate_log() {
        // テスト項目: query は読み取り専用でログを変更しない
        // given (前提条件):
        let mut log = MessageLog::new(10);
        log.append(draft("one"), Timestamp::new(100));

        // when (操作):
        let filtered = log.query(Timestamp::new(500));

        // then (期待する結果):
        assert!(filtered.is_empty());
        assert_eq!(log.query(Timestamp::EPOCH).len(), 1);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        // テスト項目: 容量 0 は 1 として扱われる
        // given (前提条件):
        let mut log = MessageLog::new(0);

        // when (操作):
        log.append(draft("a"), Timestamp::new(1));
        log.append(draft("b"), Timestamp::new(2));

        // then (期待する結果):
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.query(Timestamp::EPOCH)[0].text, "b");
    }

    #[test]
    fn test_default_capacity() {
        // テスト項目: デフォルト容量は 100
        // then (期待する結果):
        let log = MessageLog::default();
        assert_eq!(log.capacity(), DEFAULT_MESSAGE_CAPACITY);
        assert!(log.is_empty());
    }
}
