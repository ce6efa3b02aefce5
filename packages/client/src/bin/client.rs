//! Terminal client for the polling chat server.
//!
//! Reads lines from stdin and posts them as messages. New messages are
//! polled every second and a heartbeat keeps the user on the online list.
//! Retries the server up to 5 times (5 second interval) when it stops answering.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kairan-client -- --name Alice
//! cargo run --bin kairan-client -- -u http://127.0.0.1:3000 --user-id 3f1c...
//! ```

use clap::Parser;

use kairan_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kairan-client")]
#[command(about = "Polling chat client with names, presence and image upload", long_about = None)]
struct Args {
    /// Chat server URL
    #[arg(short = 'u', long, default_value = "http://127.0.0.1:3000")]
    url: String,

    /// Stable user id (a random UUID v4 is generated if omitted)
    #[arg(short = 'i', long)]
    user_id: Option<String>,

    /// Display name to bind on startup (can only be set once per user id)
    #[arg(short = 'n', long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let user_id = args
        .user_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    // Run the client
    if let Err(e) = kairan_client::run_client(args.url, user_id, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
