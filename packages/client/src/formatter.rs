//! Message formatting utilities for client display.

use kairan_server::infrastructure::dto::http::{ChatMessageDto, SetNameResponse};
use kairan_shared::time::timestamp_to_jst_rfc3339;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a polled chat message
    ///
    /// # Arguments
    ///
    /// * `message` - The message as returned by `/messages`
    /// * `base_url` - Server URL, used to print a fetchable image link
    /// * `current_user_id` - The current user's id (to mark as "me")
    pub fn format_chat_message(
        message: &ChatMessageDto,
        base_url: &str,
        current_user_id: &str,
    ) -> String {
        let me_suffix = if message.user_id == current_user_id {
            " (me)"
        } else {
            ""
        };
        let mut output = format!(
            "\n[{}] {}{}: {}\n",
            message.time, message.name, me_suffix, message.text
        );
        if let Some(image) = &message.image {
            output.push_str(&format!("  image: {}{}\n", base_url, image));
        }
        output
    }

    /// Format a confirmation message after sending
    ///
    /// # Arguments
    ///
    /// * `name` - The name the server attached to the message
    /// * `sent_at` - Unix timestamp when the server accepted the message (milliseconds)
    pub fn format_sent_confirmation(name: &str, sent_at: i64) -> String {
        format!("sent as {} at {}\n", name, timestamp_to_jst_rfc3339(sent_at))
    }

    /// Format the result of `/name`
    pub fn format_name_binding(response: &SetNameResponse) -> String {
        if response.status == "created" {
            format!("\nYour name is now '{}'\n", response.name)
        } else {
            format!(
                "\nYour name is already set to '{}' and cannot be changed\n",
                response.name
            )
        }
    }

    /// Format the result of `/clear`
    pub fn format_cleared(cleared_at: i64) -> String {
        format!(
            "\nHistory cleared at {}\n",
            timestamp_to_jst_rfc3339(cleared_at)
        )
    }

    /// Format the result of `/online`
    pub fn format_online(names: &[String]) -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");
        output.push_str(&format!("Online ({}):\n", names.len()));

        if names.is_empty() {
            output.push_str("(Nobody online)\n");
        } else {
            for name in names {
                output.push_str(&format!("{}\n", name));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format the command list shown by `/help`
    pub fn format_help() -> String {
        "\nCommands:\n\
         \x20 /name NAME            set your display name (once)\n\
         \x20 /clear                hide everything sent so far\n\
         \x20 /online               list who is online\n\
         \x20 /image PATH [caption] send an image\n\
         \x20 /quit                 exit\n"
            .to_string()
    }

    /// Format an error reported to the user without ending the session
    pub fn format_error(message: &str) -> String {
        format!("\n! {}\n", message)
    }
}
