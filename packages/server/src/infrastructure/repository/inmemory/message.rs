//! InMemory Message Repository 実装

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageDraft, MessageLog, MessageRepository, Timestamp};

/// インメモリ Message Repository 実装
///
/// `MessageLog` ドメインモデルを保持し、ドメイン層の MessageRepository trait を実装します。
pub struct InMemoryMessageRepository {
    log: Mutex<MessageLog>,
}

impl InMemoryMessageRepository {
    /// 新しい InMemoryMessageRepository を作成
    pub fn new(log: MessageLog) -> Self {
        Self {
            log: Mutex::new(log),
        }
    }

    /// 指定した容量で空のリポジトリを作成
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(MessageLog::new(capacity))
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, draft: MessageDraft, received_at: Timestamp) -> ChatMessage {
        let mut log = self.log.lock().await;
        log.append(draft, received_at)
    }

    async fn query(&self, since: Timestamp) -> Vec<ChatMessage> {
        let log = self.log.lock().await;
        log.query(since)
    }

    async fn count(&self) -> usize {
        let log = self.log.lock().await;
        log.len()
    }

    async fn capacity(&self) -> usize {
        let log = self.log.lock().await;
        log.capacity()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{DisplayName, UserId};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - append / query の基本動作
    // - 並行 append 時にも容量制限が守られること
    //
    // 【なぜこのテストが必要か】
    // - 複数リクエストが同時にメッセージを追加しても、
    //   削除（eviction）と追加が 1 つのクリティカルセクションで行われることを保証する
    // ========================================

    fn draft(user: &str, text: &str) -> MessageDraft {
        MessageDraft::new(
            UserId::new(user.to_string()).unwrap(),
            DisplayName::new("Tester".to_string()).unwrap(),
            text.to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn test_append_and_query() {
        // テスト項目: 追加したメッセージが query で取得できる
        // given (前提条件):
        let repo = InMemoryMessageRepository::with_capacity(10);

        // when (操作):
        let stored = repo.append(draft("u1", "hi"), Timestamp::new(1_000)).await;
        let result = repo.query(Timestamp::EPOCH).await;

        // then (期待する結果):
        assert_eq!(result, vec![stored]);
        assert_eq!(repo.count().await, 1);
        assert_eq!(repo.capacity().await, 10);
    }

    #[tokio::test]
    async fn test_concurrent_appends_respect_capacity() {
        // テスト項目: 並行して追加しても保持数は容量ちょうどになる
        // given (前提条件):
        let capacity = 25;
        let repo = Arc::new(InMemoryMessageRepository::with_capacity(capacity));

        // when (操作): 8 タスク × 20 件を同時に追加
        let mut handles = Vec::new();
        for task in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..20 {
                    repo.append(
                        draft(&format!("u{task}"), &format!("{task}-{i}")),
                        Timestamp::new(1 + task * 100 + i),
                    )
                    .await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        assert_eq!(repo.count().await, capacity);
        assert_eq!(repo.query(Timestamp::EPOCH).await.len(), capacity);
    }

    #[tokio::test]
    async fn test_query_snapshot_is_unaffected_by_later_appends() {
        // テスト項目: 取得済みのスナップショットは後続の追加の影響を受けない
        // given (前提条件):
        let repo = InMemoryMessageRepository::with_capacity(2);
        repo.append(draft("u1", "a"), Timestamp::new(1)).await;
        repo.append(draft("u1", "b"), Timestamp::new(2)).await;
        let snapshot = repo.query(Timestamp::EPOCH).await;

        // when (操作): 追加により "a" が削除される
        repo.append(draft("u1", "c"), Timestamp::new(3)).await;

        // then (期待する結果):
        let texts: Vec<&str> = snapshot.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }
}
