//! HTTP handlers.

pub mod http;

pub use http::{
    clear_messages, get_messages, health_check, heartbeat, list_online, send_message, set_name,
};
