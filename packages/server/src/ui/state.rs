//! Server state.

use std::sync::Arc;

use crate::usecase::{
    ClearMessagesUseCase, GetMessagesUseCase, HeartbeatUseCase, ListOnlineUseCase,
    SendMessageUseCase, SetNameUseCase,
};

/// Shared application state
///
/// Built once at startup and handed to every handler through the axum
/// `State` extractor; there is no process-global chat state.
pub struct AppState {
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// GetMessagesUseCase（メッセージ取得のユースケース）
    pub get_messages_usecase: Arc<GetMessagesUseCase>,
    /// SetNameUseCase（名前登録のユースケース）
    pub set_name_usecase: Arc<SetNameUseCase>,
    /// ClearMessagesUseCase（表示クリアのユースケース）
    pub clear_messages_usecase: Arc<ClearMessagesUseCase>,
    /// HeartbeatUseCase（heartbeat のユースケース）
    pub heartbeat_usecase: Arc<HeartbeatUseCase>,
    /// ListOnlineUseCase（オンライン一覧取得のユースケース）
    pub list_online_usecase: Arc<ListOnlineUseCase>,
}
