//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{StorageError, ValueObjectError};

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// userId が空
    #[error(transparent)]
    InvalidArgument(#[from] ValueObjectError),

    /// 添付ファイルの保存に失敗（メッセージは追加されない）
    #[error(transparent)]
    AttachmentFailed(#[from] StorageError),
}

/// 名前登録のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetNameError {
    /// userId または name が空
    #[error(transparent)]
    InvalidArgument(#[from] ValueObjectError),
}

/// 表示クリアのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClearMessagesError {
    /// userId が空
    #[error(transparent)]
    InvalidArgument(#[from] ValueObjectError),
}

/// heartbeat のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeartbeatError {
    /// userId が空
    #[error(transparent)]
    InvalidArgument(#[from] ValueObjectError),
}
