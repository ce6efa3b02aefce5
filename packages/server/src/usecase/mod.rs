//! UseCase 層
//!
//! HTTP の入口から呼ばれる 6 つの操作を提供します。
//! 各ユースケースは Repository trait と Clock にのみ依存し、
//! 具体的な実装（インメモリ、ローカルディスク）は知りません。

mod clear_messages;
mod error;
mod get_messages;
mod heartbeat;
mod list_online;
mod send_message;
mod set_name;

pub use clear_messages::ClearMessagesUseCase;
pub use error::{ClearMessagesError, HeartbeatError, SendMessageError, SetNameError};
pub use get_messages::GetMessagesUseCase;
pub use heartbeat::HeartbeatUseCase;
pub use list_online::ListOnlineUseCase;
pub use send_message::{SendMessageInput, SendMessageUseCase};
pub use set_name::SetNameUseCase;
