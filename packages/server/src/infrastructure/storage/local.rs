//! Local-disk AttachmentStorage 実装
//!
//! ファイル名は `<保存時刻ミリ秒>-<0..10000 の乱数><元の拡張子>` の形式です。
//! 同名ファイルが既に存在する場合は新しい名前で再試行し、既存ファイルを上書きしません。

use std::{
    ffi::OsStr,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use kairan_shared::time::Clock;
use rand::Rng;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::domain::{Attachment, AttachmentStorage, ImageRef, StorageError};

/// Upper bound of the random file-name suffix (exclusive).
const RANDOM_SUFFIX_BOUND: u32 = 10_000;

/// Attempts at finding an unused file name before giving up.
const MAX_NAME_ATTEMPTS: u32 = 8;

/// Longest extension carried over from the original file name.
const MAX_EXTENSION_LEN: usize = 16;

/// Stores attachments as files under `root` and returns `<url_prefix>/<file>`.
pub struct LocalAttachmentStorage {
    root: PathBuf,
    url_prefix: String,
    clock: Arc<dyn Clock>,
}

impl LocalAttachmentStorage {
    /// 新しい LocalAttachmentStorage を作成
    ///
    /// # Arguments
    ///
    /// * `root` - 保存先ディレクトリ（存在しなければ最初の保存時に作成）
    /// * `url_prefix` - 返却する参照の接頭辞（例: "/uploads"）
    /// * `clock` - ファイル名の時刻部分に使う時計
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
            clock,
        }
    }

    fn reference_for(&self, file_name: &str) -> Result<ImageRef, StorageError> {
        let prefix = self.url_prefix.trim_end_matches('/');
        ImageRef::new(format!("{prefix}/{file_name}"))
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }
}

/// Extension of the original file name including the dot, or "" when the
/// name has none or it contains anything but ASCII alphanumerics.
fn sanitized_extension(original: &str) -> String {
    Path::new(original)
        .extension()
        .and_then(OsStr::to_str)
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

fn generate_file_name(now_millis: i64, original: &str) -> String {
    let suffix = rand::rng().random_range(0..RANDOM_SUFFIX_BOUND);
    format!("{}-{}{}", now_millis, suffix, sanitized_extension(original))
}

#[async_trait]
impl AttachmentStorage for LocalAttachmentStorage {
    async fn store(&self, attachment: Attachment) -> Result<ImageRef, StorageError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let file_name = generate_file_name(self.clock.now_millis(), &attachment.file_name);
            let path = self.root.join(&file_name);

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!("Attachment name '{}' taken, retrying", file_name);
                    continue;
                }
                Err(e) => return Err(StorageError::WriteFailed(e.to_string())),
            };

            let written = match file.write_all(&attachment.bytes).await {
                Ok(()) => file.flush().await,
                Err(e) => Err(e),
            };
            if let Err(e) = written {
                // 書きかけのファイルを参照するメッセージは作られないので削除しておく
                let _ = tokio::fs::remove_file(&path).await;
                return Err(StorageError::WriteFailed(e.to_string()));
            }

            tracing::info!(
                "Stored attachment '{}' ({} bytes) as '{}'",
                attachment.file_name,
                attachment.bytes.len(),
                path.display()
            );
            return self.reference_for(&file_name);
        }

        Err(StorageError::NameExhausted(MAX_NAME_ATTEMPTS))
    }
}
