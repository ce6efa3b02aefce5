//! ドメイン層
//!
//! - `value_object`: 検証済みの値（UserId, DisplayName, Timestamp, ImageRef）
//! - `entity`: ChatMessage, PresenceEntry などのエンティティ
//! - `model`: 4 つのインメモリテーブル（メッセージログ、名前レジストリ、
//!   クリア・ウォーターマーク、プレゼンス）の純粋なロジック
//! - `repository`: ユースケース層が依存するデータアクセスの trait
//! - `storage`: 添付ファイル保存の trait（外部コラボレーター）

pub mod entity;
pub mod error;
pub mod model;
pub mod repository;
pub mod storage;
pub mod value_object;

pub use entity::{BindStatus, ChatMessage, MessageDraft, NameBinding, PresenceEntry};
pub use error::{StorageError, ValueObjectError};
pub use model::{
    DEFAULT_LIVENESS_WINDOW_MILLIS, DEFAULT_MESSAGE_CAPACITY, MessageLog, NameRegistry,
    PresenceTracker, WatermarkTable,
};
pub use repository::{
    MessageRepository, NameRepository, PresenceRepository, WatermarkRepository,
};
pub use storage::{Attachment, AttachmentStorage};
pub use value_object::{DisplayName, ImageRef, Timestamp, UserId};
