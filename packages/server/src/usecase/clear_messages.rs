//! UseCase: 表示クリア処理
//!
//! 呼び出したユーザーのウォーターマークを現在時刻に進める。
//! 共有のメッセージログや他のユーザーの表示には一切影響しない。

use std::sync::Arc;

use kairan_shared::time::Clock;

use crate::domain::{Timestamp, UserId, WatermarkRepository};

use super::error::ClearMessagesError;

/// 表示クリアのユースケース
pub struct ClearMessagesUseCase {
    watermark_repository: Arc<dyn WatermarkRepository>,
    clock: Arc<dyn Clock>,
}

impl ClearMessagesUseCase {
    /// 新しい ClearMessagesUseCase を作成
    pub fn new(watermark_repository: Arc<dyn WatermarkRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            watermark_repository,
            clock,
        }
    }

    /// 表示クリアを実行
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - 新しいウォーターマーク
    /// * `Err(ClearMessagesError)` - userId が空
    pub async fn execute(&self, user_id: String) -> Result<Timestamp, ClearMessagesError> {
        let user_id = UserId::new(user_id)?;
        let now = Timestamp::new(self.clock.now_millis());
        let watermark = self.watermark_repository.clear(user_id.clone(), now).await;
        tracing::debug!("View of '{}' cleared up to {}", user_id, watermark.value());
        Ok(watermark)
    }
}
