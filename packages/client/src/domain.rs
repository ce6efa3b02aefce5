//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use std::path::PathBuf;

use kairan_server::infrastructure::dto::http::ChatMessageDto;

/// One line of user input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text message
    Say(String),
    /// `/name NAME`
    Name(String),
    /// `/clear`
    Clear,
    /// `/online`
    Online,
    /// `/image PATH [caption]`
    Image { path: PathBuf, caption: String },
    /// `/help`
    Help,
    /// `/quit` or `/exit`
    Quit,
    /// Malformed command, with a hint for the user
    Invalid(String),
}

/// Parse an input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if !line.starts_with('/') {
        return Some(Command::Say(line.to_string()));
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let parsed = match command {
        "/name" if rest.is_empty() => Command::Invalid("usage: /name NAME".to_string()),
        "/name" => Command::Name(rest.to_string()),
        "/clear" => Command::Clear,
        "/online" => Command::Online,
        "/image" if rest.is_empty() => {
            Command::Invalid("usage: /image PATH [caption]".to_string())
        }
        "/image" => {
            let (path, caption) = match rest.split_once(char::is_whitespace) {
                Some((path, caption)) => (path, caption.trim()),
                None => (rest, ""),
            };
            Command::Image {
                path: PathBuf::from(path),
                caption: caption.to_string(),
            }
        }
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command '{}', try /help", other)),
    };
    Some(parsed)
}

/// Tracks which polled messages were already printed.
///
/// The server returns the whole visible history on every poll, ordered by
/// `sentAt`. The cursor remembers the newest `sentAt` printed and how many
/// messages shared it, so bursts within one millisecond are not lost.
#[derive(Debug, Default)]
pub struct MessageCursor {
    last_sent_at: Option<i64>,
    seen_at_last: usize,
}

impl MessageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the messages not yet printed and move the cursor past them
    pub fn advance<'a>(&mut self, messages: &'a [ChatMessageDto]) -> Vec<&'a ChatMessageDto> {
        let mut fresh = Vec::new();
        let mut same_as_last = 0usize;

        for message in messages {
            match self.last_sent_at {
                Some(last) if message.sent_at < last => continue,
                Some(last) if message.sent_at == last => {
                    same_as_last += 1;
                    if same_as_last <= self.seen_at_last {
                        continue;
                    }
                }
                _ => {}
            }
            fresh.push(message);
        }

        if let Some(newest) = messages.iter().map(|m| m.sent_at).max() {
            let count = messages.iter().filter(|m| m.sent_at == newest).count();
            match self.last_sent_at {
                Some(last) if newest < last => {}
                Some(last) if newest == last => {
                    self.seen_at_last = self.seen_at_last.max(count);
                }
                _ => {
                    self.last_sent_at = Some(newest);
                    self.seen_at_last = count;
                }
            }
        }

        fresh
    }
}

/// Check if the client should attempt to reach the server again.
///
/// # Arguments
///
/// * `current_attempt` - The number of failed attempts so far
/// * `max_attempts` - The maximum number of attempts allowed
pub fn should_attempt_reconnect(current_attempt: u32, max_attempts: u32) -> bool {
    current_attempt < max_attempts
}
