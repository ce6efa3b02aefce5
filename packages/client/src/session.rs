//! Polling client session management.

use std::{sync::Arc, time::Duration};

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use crate::{api::ChatApi, error::ClientError};

use super::{
    domain::{Command, MessageCursor, parse_command},
    formatter::MessageFormatter,
    ui::{prompt, redisplay_prompt},
};

/// How often `/messages` is polled
const POLL_INTERVAL: Duration = Duration::from_secs(1);
/// How often a heartbeat is sent
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(10);
/// Consecutive failed polls before the session is considered lost
const MAX_POLL_FAILURES: u32 = 5;

/// Run one client session until the user quits or the server stops answering
pub async fn run_client_session(
    api: Arc<ChatApi>,
    name_hint: Option<String>,
) -> Result<(), ClientError> {
    api.health().await?;
    tracing::info!("Connected to chat server at {}", api.base_url());

    // A name given on the command line is bound up front
    let label = match &name_hint {
        Some(name) => match api.set_name(name).await {
            Ok(binding) => {
                print!("{}", MessageFormatter::format_name_binding(&binding));
                binding.name
            }
            Err(ClientError::Rejected { message, .. }) => {
                print!("{}", MessageFormatter::format_error(&message));
                name.clone()
            }
            Err(e) => return Err(e),
        },
        None => api.user_id().chars().take(8).collect(),
    };

    println!(
        "\nYou are '{}' (user id {}). Type messages and press Enter to send. /help lists commands.\n",
        label,
        api.user_id()
    );

    // Poll task: print messages not seen yet
    let api_for_poll = api.clone();
    let label_for_poll = label.clone();
    let mut poll_task: tokio::task::JoinHandle<Result<(), ClientError>> = tokio::spawn(async move {
        let mut cursor = MessageCursor::new();
        let mut failures = 0;
        let mut interval = tokio::time::interval(POLL_INTERVAL);

        loop {
            interval.tick().await;
            match api_for_poll.messages().await {
                Ok(messages) => {
                    failures = 0;
                    let fresh = cursor.advance(&messages);
                    if fresh.is_empty() {
                        continue;
                    }
                    for message in fresh {
                        print!(
                            "{}",
                            MessageFormatter::format_chat_message(
                                message,
                                api_for_poll.base_url(),
                                api_for_poll.user_id(),
                            )
                        );
                    }
                    redisplay_prompt(&label_for_poll);
                }
                Err(e) => {
                    failures += 1;
                    tracing::warn!("Poll failed ({}/{}): {}", failures, MAX_POLL_FAILURES, e);
                    if failures >= MAX_POLL_FAILURES {
                        return Err(ClientError::ConnectionError(
                            "Server stopped responding".to_string(),
                        ));
                    }
                }
            }
        }
    });

    // Heartbeat task: keep this user on the online list
    let api_for_heartbeat = api.clone();
    let hint_for_heartbeat = name_hint.clone();
    let heartbeat_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);
        loop {
            interval.tick().await;
            if let Err(e) = api_for_heartbeat
                .heartbeat(hint_for_heartbeat.as_deref())
                .await
            {
                tracing::debug!("Heartbeat failed: {}", e);
            }
        }
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt_text = prompt(&label);
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt_text) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Input task: run each command against the server
    let api_for_input = api.clone();
    let mut input_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let Some(command) = parse_command(&line) else {
                continue;
            };
            if command == Command::Quit {
                break;
            }
            let output = run_command(&api_for_input, name_hint.as_deref(), command).await;
            print!("{}", output);
            redisplay_prompt(&label);
        }
    });

    // If either task completes, stop the other ones
    let result = tokio::select! {
        poll_result = &mut poll_task => {
            input_task.abort();
            match poll_result {
                Ok(Err(e)) => Err(e),
                _ => Ok(()),
            }
        }
        _ = &mut input_task => {
            poll_task.abort();
            Ok(())
        }
    };
    heartbeat_task.abort();

    result
}

/// Execute one parsed command and return what to print
async fn run_command(api: &ChatApi, name_hint: Option<&str>, command: Command) -> String {
    let result = match command {
        Command::Say(text) => api
            .send_text(&text, name_hint)
            .await
            .map(|sent| MessageFormatter::format_sent_confirmation(&sent.name, sent.message.sent_at)),
        Command::Image { path, caption } => api
            .send_image(&path, &caption, name_hint)
            .await
            .map(|sent| MessageFormatter::format_sent_confirmation(&sent.name, sent.message.sent_at)),
        Command::Name(name) => api
            .set_name(&name)
            .await
            .map(|binding| MessageFormatter::format_name_binding(&binding)),
        Command::Clear => api
            .clear()
            .await
            .map(|cleared| MessageFormatter::format_cleared(cleared.cleared_at)),
        Command::Online => api
            .online()
            .await
            .map(|names| MessageFormatter::format_online(&names)),
        Command::Help => Ok(MessageFormatter::format_help()),
        Command::Invalid(hint) => Ok(MessageFormatter::format_error(&hint)),
        Command::Quit => Ok(String::new()),
    };

    result.unwrap_or_else(|e| {
        tracing::warn!("Command failed: {}", e);
        MessageFormatter::format_error(&e.to_string())
    })
}
