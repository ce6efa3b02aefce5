//! UseCase: オンラインユーザー一覧取得処理
//!
//! 呼び出しのたびに期限切れのプレゼンスを削除してから一覧を返す。
//! バックグラウンドでの定期削除は行わない（読み取り時のみ期限切れが反映される）。

use std::sync::Arc;

use kairan_shared::time::Clock;

use crate::domain::{DisplayName, PresenceRepository, Timestamp};

/// オンラインユーザー一覧取得のユースケース
pub struct ListOnlineUseCase {
    presence_repository: Arc<dyn PresenceRepository>,
    clock: Arc<dyn Clock>,
}

impl ListOnlineUseCase {
    /// 新しい ListOnlineUseCase を作成
    pub fn new(presence_repository: Arc<dyn PresenceRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            presence_repository,
            clock,
        }
    }

    /// オンラインユーザー一覧取得を実行
    ///
    /// # Returns
    ///
    /// ライブネスウィンドウ内に heartbeat があったユーザーの表示名（挿入順、重複あり）
    pub async fn execute(&self) -> Vec<DisplayName> {
        let now = Timestamp::new(self.clock.now_millis());
        self.presence_repository.live_names(now).await
    }
}
