//! Infrastructure 層
//!
//! - `repository`: ドメイン層の Repository trait のインメモリ実装
//! - `storage`: 添付ファイルのローカルディスク保存
//! - `dto`: HTTP API のリクエスト/レスポンス DTO

pub mod dto;
pub mod repository;
pub mod storage;
