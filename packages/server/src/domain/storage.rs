//! 添付ファイル保存の trait 定義
//!
//! 添付ファイルのバイト列はドメインの外側で保存され、
//! ドメインは保存先を指す `ImageRef` だけを保持します。

use async_trait::async_trait;

use super::{ImageRef, StorageError};

/// Uploaded file as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name; only its extension is kept.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Attachment Storage trait
///
/// メッセージ追加の前に呼び出される外部コラボレーター。
/// 保存に失敗した場合、そのリクエストは失敗しメッセージは追加されない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentStorage: Send + Sync {
    /// 衝突しにくい名前で保存し、取得可能な参照を返す
    async fn store(&self, attachment: Attachment) -> Result<ImageRef, StorageError>;
}
