//! Client execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use crate::{api::ChatApi, error::ClientError};

use super::{domain::should_attempt_reconnect, session::run_client_session};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the polling client with reconnection logic
pub async fn run_client(
    url: String,
    user_id: String,
    name: Option<String>,
) -> Result<(), ClientError> {
    let api = Arc::new(ChatApi::new(url, user_id));
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            api.base_url(),
            api.user_id(),
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(api.clone(), name.clone()).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If the session ended normally (user exit), don't reconnect
                return Ok(());
            }
            Err(ClientError::ConnectionError(reason)) => {
                tracing::warn!("Connection lost: {}", reason);
                reconnect_count += 1;

                if !should_attempt_reconnect(reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(ClientError::ConnectionError(reason));
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
            Err(e) => return Err(e),
        }
    }
}
