//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 原子性
//!
//! 各メソッドは 1 つのクリティカルセクションとして実行されなければなりません。
//! 特に `NameRepository::resolve` / `try_set` は check-and-set を分割せず、
//! 同じ userId への同時初回呼び出しでも全員が同じ名前を観測すること。
//! 4 つのテーブルはそれぞれ独立しており、テーブルを跨いだロックは取りません。

use async_trait::async_trait;

use super::{ChatMessage, DisplayName, MessageDraft, NameBinding, Timestamp, UserId};

/// Message Repository trait
///
/// 容量制限付きの追記専用メッセージログ。
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// メッセージを末尾に追加し、容量を超えた分を先頭から削除する
    ///
    /// `draft.sent_at` が `None` の場合は `received_at` を送信時刻とする。
    async fn append(&self, draft: MessageDraft, received_at: Timestamp) -> ChatMessage;

    /// `sent_at > since` のメッセージを挿入順で取得（スナップショット）
    async fn query(&self, since: Timestamp) -> Vec<ChatMessage>;

    /// 保持しているメッセージ数を取得
    async fn count(&self) -> usize;

    /// 最大保持数を取得
    async fn capacity(&self) -> usize;
}

/// Name Repository trait
///
/// userId → 表示名の一度だけ書き込めるマッピング。
#[async_trait]
pub trait NameRepository: Send + Sync {
    /// 名前を解決する（未登録なら `requested` またはフォールバック名で登録）
    async fn resolve(&self, user_id: &UserId, requested: Option<DisplayName>) -> DisplayName;

    /// 明示的な set-once。既に登録済みなら AlreadyBound と既存の名前を返す
    async fn try_set(&self, user_id: UserId, name: DisplayName) -> NameBinding;

    /// 登録済みの名前を参照（登録はしない）
    async fn lookup(&self, user_id: &UserId) -> Option<DisplayName>;
}

/// Watermark Repository trait
///
/// userId → クリア時刻。メッセージログには一切触れない。
#[async_trait]
pub trait WatermarkRepository: Send + Sync {
    /// ウォーターマークを `now` に進めて、保存された値を返す
    async fn clear(&self, user_id: UserId, now: Timestamp) -> Timestamp;

    /// ウォーターマークを取得（未設定なら `Timestamp::EPOCH`）
    async fn watermark_of(&self, user_id: &UserId) -> Timestamp;
}

/// Presence Repository trait
///
/// userId → (表示名, 最終 heartbeat 時刻)。期限切れは読み取り時にのみ削除する。
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// heartbeat を記録
    async fn heartbeat(&self, user_id: UserId, name: DisplayName, now: Timestamp);

    /// 期限切れのエントリを削除し、残ったエントリの名前を返す
    async fn live_names(&self, now: Timestamp) -> Vec<DisplayName>;
}
