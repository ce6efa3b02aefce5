//! UI utilities for the client.

use std::io::Write;

/// Prompt shown by the line editor
pub fn prompt(label: &str) -> String {
    format!("{}> ", label)
}

/// Redisplay the prompt after printing output from a background task
pub fn redisplay_prompt(label: &str) {
    print!("{}", prompt(label));
    std::io::stdout().flush().ok();
}
