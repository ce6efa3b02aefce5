//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 名前の解決（初回送信時の自動登録）、添付ファイルの保存、メッセージログへの追加
//!
//! ### なぜこのテストが必要か
//! - 初回送信時に名前が一度だけ登録されることを保証する
//! - 添付ファイルの保存に失敗した場合、メッセージも名前も追加されないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：テキストのみ、画像付き
//! - 異常系：userId が空、添付ファイルの保存失敗
//! - エッジケース：容量超過時の古いメッセージ削除

use std::sync::Arc;

use kairan_shared::time::Clock;

use crate::domain::{
    Attachment, AttachmentStorage, ChatMessage, DisplayName, MessageDraft, MessageRepository,
    NameRepository, Timestamp, UserId,
};

use super::error::SendMessageError;

/// メッセージ送信の入力
#[derive(Debug, Clone, Default)]
pub struct SendMessageInput {
    /// 送信者の userId（必須）
    pub user_id: String,
    /// 本文（省略時は空文字）
    pub text: Option<String>,
    /// 名前のヒント（初回の名前解決時にのみ使われる）
    pub name: Option<String>,
    /// 添付ファイル
    pub attachment: Option<Attachment>,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（メッセージログ）
    message_repository: Arc<dyn MessageRepository>,
    /// Repository（名前レジストリ）
    name_repository: Arc<dyn NameRepository>,
    /// 添付ファイルの保存先
    attachment_storage: Arc<dyn AttachmentStorage>,
    /// 時計
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        message_repository: Arc<dyn MessageRepository>,
        name_repository: Arc<dyn NameRepository>,
        attachment_storage: Arc<dyn AttachmentStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            message_repository,
            name_repository,
            attachment_storage,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 追加されたメッセージ（解決済みの名前を含む）
    /// * `Err(SendMessageError)` - 送信失敗（状態は一切変更されない）
    pub async fn execute(&self, input: SendMessageInput) -> Result<ChatMessage, SendMessageError> {
        // 1. 入力の検証
        let user_id = UserId::new(input.user_id)?;

        // 2. 添付ファイルの保存（テーブルを変更する前に行う）
        let image = match input.attachment {
            Some(attachment) => Some(self.attachment_storage.store(attachment).await?),
            None => None,
        };

        // 3. 名前の解決（未登録ならここで登録される）
        let name = self
            .name_repository
            .resolve(&user_id, DisplayName::from_hint(input.name))
            .await;

        // 4. メッセージログに追加
        let draft = MessageDraft::new(user_id, name, input.text.unwrap_or_default(), image);
        let received_at = Timestamp::new(self.clock.now_millis());
        let message = self.message_repository.append(draft, received_at).await;

        let held = self.message_repository.count().await;
        let capacity = self.message_repository.capacity().await;
        tracing::debug!(
            "Message from '{}' ({}) appended at {}, log holds {}/{}",
            message.user_id,
            message.name,
            message.sent_at.value(),
            held,
            capacity
        );

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            ImageRef, StorageError, ValueObjectError, storage::MockAttachmentStorage,
        },
        infrastructure::repository::{InMemoryMessageRepository, InMemoryNameRepository},
    };
    use kairan_shared::time::ManualClock;

    struct Fixture {
        messages: Arc<InMemoryMessageRepository>,
        names: Arc<InMemoryNameRepository>,
        clock: Arc<ManualClock>,
    }

    fn fixture(capacity: usize) -> Fixture {
        Fixture {
            messages: Arc::new(InMemoryMessageRepository::with_capacity(capacity)),
            names: Arc::new(InMemoryNameRepository::default()),
            clock: Arc::new(ManualClock::new(1_000)),
        }
    }

    fn usecase(fixture: &Fixture, storage: MockAttachmentStorage) -> SendMessageUseCase {
        SendMessageUseCase::new(
            fixture.messages.clone(),
            fixture.names.clone(),
            Arc::new(storage),
            fixture.clock.clone(),
        )
    }

    fn no_storage() -> MockAttachmentStorage {
        let mut storage = MockAttachmentStorage::new();
        storage.expect_store().never();
        storage
    }

    fn text_input(user_id: &str, text: &str, name: Option<&str>) -> SendMessageInput {
        SendMessageInput {
            user_id: user_id.to_string(),
            text: Some(text.to_string()),
            name: name.map(str::to_string),
            attachment: None,
        }
    }

    #[tokio::test]
    async fn test_send_message_success() {
        // テスト項目: メッセージ送信が成功し、ログに追加される
        // given (前提条件):
        let fixture = fixture(100);
        let usecase = usecase(&fixture, no_storage());

        // when (操作):
        let result = usecase.execute(text_input("u1", "hi", Some("Alice"))).await;

        // then (期待する結果):
        let message = result.unwrap();
        assert_eq!(message.user_id.as_str(), "u1");
        assert_eq!(message.name.as_str(), "Alice");
        assert_eq!(message.text, "hi");
        assert_eq!(message.image, None);
        assert_eq!(message.sent_at, Timestamp::new(1_000));

        let stored = fixture.messages.query(Timestamp::EPOCH).await;
        assert_eq!(stored, vec![message]);
    }

    #[tokio::test]
    async fn test_first_send_without_name_binds_fallback() {
        // テスト項目: 名前なしの初回送信で "Anon-" 名が登録され、以後も使われる
        // given (前提条件):
        let fixture = fixture(100);
        let usecase = usecase(&fixture, no_storage());

        // when (操作):
        let first = usecase
            .execute(text_input("abcdefgh", "one", None))
            .await
            .unwrap();
        let second = usecase
            .execute(text_input("abcdefgh", "two", Some("Chosen Later")))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(first.name.as_str(), "Anon-abcdef");
        assert_eq!(second.name.as_str(), "Anon-abcdef");
    }

    #[tokio::test]
    async fn test_name_hint_ignored_after_binding() {
        // テスト項目: 登録済みユーザーの名前ヒントは無視される
        // given (前提条件):
        let fixture = fixture(100);
        let usecase = usecase(&fixture, no_storage());
        usecase
            .execute(text_input("u1", "hello", Some("Alice")))
            .await
            .unwrap();

        // when (操作):
        let result = usecase
            .execute(text_input("u1", "again", Some("Mallory")))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(result.name.as_str(), "Alice");
    }

    #[tokio::test]
    async fn test_send_message_empty_user_id() {
        // テスト項目: userId が空の場合は InvalidArgument で何も変更されない
        // given (前提条件):
        let fixture = fixture(100);
        let usecase = usecase(&fixture, no_storage());

        // when (操作):
        let result = usecase.execute(text_input("", "hi", Some("Alice"))).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SendMessageError::InvalidArgument(ValueObjectError::EmptyUserId))
        );
        assert_eq!(fixture.messages.count().await, 0);
    }

    #[tokio::test]
    async fn test_send_message_missing_text_is_empty() {
        // テスト項目: 本文なしのメッセージは空文字として保存される
        // given (前提条件):
        let fixture = fixture(100);
        let usecase = usecase(&fixture, no_storage());

        // when (操作):
        let result = usecase
            .execute(SendMessageInput {
                user_id: "u1".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(result.text, "");
    }

    #[tokio::test]
    async fn test_send_message_with_attachment() {
        // テスト項目: 添付ファイルは保存され、その参照がメッセージに入る
        // given (前提条件):
        let fixture = fixture(100);
        let mut storage = MockAttachmentStorage::new();
        storage
            .expect_store()
            .withf(|attachment| attachment.file_name == "cat.png" && attachment.bytes == b"png")
            .times(1)
            .returning(|_| Ok(ImageRef::new("/uploads/1000-42.png".to_string()).unwrap()));
        let usecase = usecase(&fixture, storage);

        // when (操作):
        let result = usecase
            .execute(SendMessageInput {
                user_id: "u1".to_string(),
                text: Some("look".to_string()),
                name: Some("Alice".to_string()),
                attachment: Some(Attachment {
                    file_name: "cat.png".to_string(),
                    bytes: b"png".to_vec(),
                }),
            })
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            result.image.as_ref().map(ImageRef::as_str),
            Some("/uploads/1000-42.png")
        );
    }

    #[tokio::test]
    async fn test_attachment_failure_leaves_no_trace() {
        // テスト項目: 添付ファイルの保存に失敗するとメッセージも名前も追加されない
        // given (前提条件):
        let fixture = fixture(100);
        let mut storage = MockAttachmentStorage::new();
        storage
            .expect_store()
            .times(1)
            .returning(|_| Err(StorageError::WriteFailed("disk full".to_string())));
        let usecase = usecase(&fixture, storage);

        // when (操作):
        let result = usecase
            .execute(SendMessageInput {
                user_id: "u1".to_string(),
                text: Some("look".to_string()),
                name: Some("Alice".to_string()),
                attachment: Some(Attachment {
                    file_name: "cat.png".to_string(),
                    bytes: b"png".to_vec(),
                }),
            })
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SendMessageError::AttachmentFailed(StorageError::WriteFailed(
                "disk full".to_string()
            )))
        );
        assert_eq!(fixture.messages.count().await, 0);
        let uid = UserId::new("u1".to_string()).unwrap();
        assert_eq!(fixture.names.lookup(&uid).await, None);
    }

    #[tokio::test]
    async fn test_send_101_messages_with_capacity_100() {
        // テスト項目: 容量 100 で 101 件送ると先頭は 2 件目になる
        // given (前提条件):
        let fixture = fixture(100);
        let usecase = usecase(&fixture, no_storage());

        // when (操作):
        for i in 1..=101 {
            fixture.clock.advance_millis(1);
            usecase
                .execute(text_input("u1", &format!("msg-{i}"), Some("Alice")))
                .await
                .unwrap();
        }

        // then (期待する結果):
        let messages = fixture.messages.query(Timestamp::EPOCH).await;
        assert_eq!(messages.len(), 100);
        assert_eq!(messages[0].text, "msg-2");
    }
}
