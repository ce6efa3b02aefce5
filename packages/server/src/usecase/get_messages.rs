//! UseCase: メッセージ取得処理
//!
//! userId が指定された場合はそのユーザーのウォーターマークより新しいメッセージのみを返す。
//! 指定がない（または空の）場合は保持している全メッセージを返す。

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageRepository, Timestamp, UserId, WatermarkRepository};

/// メッセージ取得のユースケース
pub struct GetMessagesUseCase {
    message_repository: Arc<dyn MessageRepository>,
    watermark_repository: Arc<dyn WatermarkRepository>,
}

impl GetMessagesUseCase {
    /// 新しい GetMessagesUseCase を作成
    pub fn new(
        message_repository: Arc<dyn MessageRepository>,
        watermark_repository: Arc<dyn WatermarkRepository>,
    ) -> Self {
        Self {
            message_repository,
            watermark_repository,
        }
    }

    /// メッセージ取得を実行
    ///
    /// # Arguments
    ///
    /// * `user_id` - 閲覧者の userId（任意）
    ///
    /// # Returns
    ///
    /// 挿入順のメッセージ一覧
    pub async fn execute(&self, user_id: Option<String>) -> Vec<ChatMessage> {
        let since = match user_id.map(UserId::new) {
            Some(Ok(user_id)) => self.watermark_repository.watermark_of(&user_id).await,
            _ => Timestamp::EPOCH,
        };
        self.message_repository.query(since).await
    }
}
