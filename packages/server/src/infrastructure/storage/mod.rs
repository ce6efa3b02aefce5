//! 添付ファイル保存の実装
//!
//! - `local`: ローカルディスクへの保存
//! - 将来的に: オブジェクトストレージなど

pub mod local;

pub use local::LocalAttachmentStorage;
