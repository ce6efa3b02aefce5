//! Server execution logic.

use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::usecase::{
    ClearMessagesUseCase, GetMessagesUseCase, HeartbeatUseCase, ListOnlineUseCase,
    SendMessageUseCase, SetNameUseCase,
};

use super::{
    handler::{
        clear_messages, get_messages, health_check, heartbeat, list_online, send_message, set_name,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Largest accepted `/send` request body (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// HTTP chat server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     send_message_usecase,
///     get_messages_usecase,
///     set_name_usecase,
///     clear_messages_usecase,
///     heartbeat_usecase,
///     list_online_usecase,
/// )
/// .with_static_dirs("uploads", "public");
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// GetMessagesUseCase（メッセージ取得のユースケース）
    get_messages_usecase: Arc<GetMessagesUseCase>,
    /// SetNameUseCase（名前登録のユースケース）
    set_name_usecase: Arc<SetNameUseCase>,
    /// ClearMessagesUseCase（表示クリアのユースケース）
    clear_messages_usecase: Arc<ClearMessagesUseCase>,
    /// HeartbeatUseCase（heartbeat のユースケース）
    heartbeat_usecase: Arc<HeartbeatUseCase>,
    /// ListOnlineUseCase（オンライン一覧取得のユースケース）
    list_online_usecase: Arc<ListOnlineUseCase>,
    /// Directory served under `/uploads`
    upload_dir: PathBuf,
    /// Directory served for every unmatched path
    public_dir: PathBuf,
}

impl Server {
    /// Create a new Server instance serving `uploads/` and `public/`
    pub fn new(
        send_message_usecase: Arc<SendMessageUseCase>,
        get_messages_usecase: Arc<GetMessagesUseCase>,
        set_name_usecase: Arc<SetNameUseCase>,
        clear_messages_usecase: Arc<ClearMessagesUseCase>,
        heartbeat_usecase: Arc<HeartbeatUseCase>,
        list_online_usecase: Arc<ListOnlineUseCase>,
    ) -> Self {
        Self {
            send_message_usecase,
            get_messages_usecase,
            set_name_usecase,
            clear_messages_usecase,
            heartbeat_usecase,
            list_online_usecase,
            upload_dir: PathBuf::from("uploads"),
            public_dir: PathBuf::from("public"),
        }
    }

    /// Override the static directories
    ///
    /// * `upload_dir` - Where stored attachments live (served under `/uploads`)
    /// * `public_dir` - Front-end assets (served as the fallback)
    pub fn with_static_dirs(
        mut self,
        upload_dir: impl Into<PathBuf>,
        public_dir: impl Into<PathBuf>,
    ) -> Self {
        self.upload_dir = upload_dir.into();
        self.public_dir = public_dir.into();
        self
    }

    /// Build the axum router
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            send_message_usecase: self.send_message_usecase.clone(),
            get_messages_usecase: self.get_messages_usecase.clone(),
            set_name_usecase: self.set_name_usecase.clone(),
            clear_messages_usecase: self.clear_messages_usecase.clone(),
            heartbeat_usecase: self.heartbeat_usecase.clone(),
            list_online_usecase: self.list_online_usecase.clone(),
        });

        Router::new()
            // チャット API
            .route(
                "/send",
                post(send_message).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
            )
            .route("/messages", get(get_messages))
            .route("/name", post(set_name))
            .route("/clear", post(clear_messages))
            .route("/heartbeat", post(heartbeat))
            .route("/online", get(list_online))
            .route("/api/health", get(health_check))
            // 静的ファイル
            .nest_service("/uploads", ServeDir::new(&self.upload_dir))
            .fallback_service(
                ServeDir::new(&self.public_dir).append_index_html_on_directories(true),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the HTTP chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Serving uploads from {}", self.upload_dir.display());
        tracing::info!("Serving front-end from {}", self.public_dir.display());
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
