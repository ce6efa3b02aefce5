//! UseCase: 名前登録処理
//!
//! 一度だけ名前を登録できる。既に登録済みの場合は AlreadyBound と既存の名前を返す
//! （エラーではなく、呼び出し側は返された名前を正とする）。

use std::sync::Arc;

use crate::domain::{DisplayName, NameBinding, NameRepository, UserId};

use super::error::SetNameError;

/// 名前登録のユースケース
pub struct SetNameUseCase {
    name_repository: Arc<dyn NameRepository>,
}

impl SetNameUseCase {
    /// 新しい SetNameUseCase を作成
    pub fn new(name_repository: Arc<dyn NameRepository>) -> Self {
        Self { name_repository }
    }

    /// 名前登録を実行
    ///
    /// # Returns
    ///
    /// * `Ok(NameBinding)` - 登録結果（Created / AlreadyBound）と確定した名前
    /// * `Err(SetNameError)` - userId または name が空
    pub async fn execute(&self, user_id: String, name: String) -> Result<NameBinding, SetNameError> {
        let user_id = UserId::new(user_id)?;
        let name = DisplayName::new(name)?;

        let binding = self.name_repository.try_set(user_id.clone(), name).await;
        tracing::debug!(
            "Name for '{}' is '{}' ({})",
            user_id,
            binding.name,
            binding.status.as_str()
        );
        Ok(binding)
    }
}
