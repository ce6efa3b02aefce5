//! UseCase: heartbeat 処理
//!
//! プレゼンスの最終確認時刻を現在時刻に更新する。
//! 表示名は 名前レジストリの登録名 → ヒント → "Anon-" 名 の順で決まる。
//! heartbeat は名前レジストリに登録を行わない（参照のみ）。

use std::sync::Arc;

use kairan_shared::time::Clock;

use crate::domain::{DisplayName, NameRepository, PresenceRepository, Timestamp, UserId};

use super::error::HeartbeatError;

/// heartbeat のユースケース
pub struct HeartbeatUseCase {
    presence_repository: Arc<dyn PresenceRepository>,
    name_repository: Arc<dyn NameRepository>,
    clock: Arc<dyn Clock>,
}

impl HeartbeatUseCase {
    /// 新しい HeartbeatUseCase を作成
    pub fn new(
        presence_repository: Arc<dyn PresenceRepository>,
        name_repository: Arc<dyn NameRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            presence_repository,
            name_repository,
            clock,
        }
    }

    /// heartbeat を実行
    ///
    /// # Returns
    ///
    /// * `Ok(DisplayName)` - プレゼンスに記録された表示名
    /// * `Err(HeartbeatError)` - userId が空
    pub async fn execute(
        &self,
        user_id: String,
        name_hint: Option<String>,
    ) -> Result<DisplayName, HeartbeatError> {
        let user_id = UserId::new(user_id)?;

        let name = match self.name_repository.lookup(&user_id).await {
            Some(bound) => bound,
            None => DisplayName::from_hint(name_hint).unwrap_or_else(|| user_id.fallback_name()),
        };

        let now = Timestamp::new(self.clock.now_millis());
        self.presence_repository
            .heartbeat(user_id, name.clone(), now)
            .await;

        Ok(name)
    }
}
