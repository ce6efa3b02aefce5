//! Polling chat server.
//!
//! Clients post messages, poll `/messages`, send heartbeats and read
//! `/online`. All chat state is in memory and resets on restart.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kairan-server
//! cargo run --bin kairan-server -- --host 0.0.0.0 --port 3000 --message-capacity 200
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use kairan_server::{
    domain::{DEFAULT_LIVENESS_WINDOW_MILLIS, DEFAULT_MESSAGE_CAPACITY},
    infrastructure::{
        repository::{
            InMemoryMessageRepository, InMemoryNameRepository, InMemoryPresenceRepository,
            InMemoryWatermarkRepository,
        },
        storage::LocalAttachmentStorage,
    },
    ui::Server,
    usecase::{
        ClearMessagesUseCase, GetMessagesUseCase, HeartbeatUseCase, ListOnlineUseCase,
        SendMessageUseCase, SetNameUseCase,
    },
};
use kairan_shared::{
    logger::setup_logger,
    time::{Clock, MonotonicClock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "kairan-server")]
#[command(about = "Polling chat server with bounded history and presence", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    /// Number of messages retained before the oldest is evicted
    #[arg(long, default_value_t = DEFAULT_MESSAGE_CAPACITY)]
    message_capacity: usize,

    /// Seconds without a heartbeat before a user drops off the online list
    #[arg(long, default_value_t = (DEFAULT_LIVENESS_WINDOW_MILLIS / 1000) as u64)]
    presence_window_secs: u64,

    /// Directory where uploaded images are stored (served under /uploads)
    #[arg(long, default_value = "uploads")]
    upload_dir: PathBuf,

    /// Directory with the static front-end
    #[arg(long, default_value = "public")]
    public_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Clock
    // 2. Repositories and attachment storage
    // 3. UseCases
    // 4. Server

    // 1. Create Clock
    // Strictly increasing, so a clear watermark always precedes later messages
    let clock: Arc<dyn Clock> = Arc::new(MonotonicClock::new(Arc::new(SystemClock)));

    // 2. Create Repositories (in-memory tables) and AttachmentStorage
    let window_millis = i64::try_from(args.presence_window_secs.saturating_mul(1000))
        .unwrap_or(i64::MAX);
    let message_repository = Arc::new(InMemoryMessageRepository::with_capacity(
        args.message_capacity,
    ));
    let name_repository = Arc::new(InMemoryNameRepository::default());
    let watermark_repository = Arc::new(InMemoryWatermarkRepository::default());
    let presence_repository = Arc::new(InMemoryPresenceRepository::with_window_millis(
        window_millis,
    ));
    let attachment_storage = Arc::new(LocalAttachmentStorage::new(
        args.upload_dir.clone(),
        "/uploads",
        clock.clone(),
    ));
    tracing::info!(
        "Message capacity {}, presence window {}s",
        args.message_capacity.max(1),
        args.presence_window_secs
    );

    // 3. Create UseCases
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        message_repository.clone(),
        name_repository.clone(),
        attachment_storage,
        clock.clone(),
    ));
    let get_messages_usecase = Arc::new(GetMessagesUseCase::new(
        message_repository.clone(),
        watermark_repository.clone(),
    ));
    let set_name_usecase = Arc::new(SetNameUseCase::new(name_repository.clone()));
    let clear_messages_usecase = Arc::new(ClearMessagesUseCase::new(
        watermark_repository.clone(),
        clock.clone(),
    ));
    let heartbeat_usecase = Arc::new(HeartbeatUseCase::new(
        presence_repository.clone(),
        name_repository.clone(),
        clock.clone(),
    ));
    let list_online_usecase = Arc::new(ListOnlineUseCase::new(
        presence_repository.clone(),
        clock.clone(),
    ));

    // 4. Create and run the server
    let server = Server::new(
        send_message_usecase,
        get_messages_usecase,
        set_name_usecase,
        clear_messages_usecase,
        heartbeat_usecase,
        list_online_usecase,
    )
    .with_static_dirs(args.upload_dir, args.public_dir);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
