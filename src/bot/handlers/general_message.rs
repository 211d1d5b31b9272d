use teloxide::prelude::*;

use super::message::HandlerResult;
use crate::utils::feedback::CommandFeedback;

/// Hint for a slash command that did not parse, e.g. `/mondy`.
pub fn unknown_command_hint(text: &str) -> Option<String> {
    if !text.starts_with('/') {
        return None;
    }
    let command = text.split_whitespace().next().unwrap_or(text);
    Some(format!("Unknown command: {command}"))
}

pub async fn handle_general_message(bot: Bot, msg: Message) -> HandlerResult {
    // Group chats are left alone so other bots' commands don't draw replies
    if !msg.chat.is_private() {
        return Ok(());
    }

    if let Some(hint) = msg.text().and_then(unknown_command_hint) {
        let feedback = CommandFeedback::new(bot, msg.chat.id);
        feedback
            .validation_error(&hint, "Use /help to see all available commands.")
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_hint() {
        assert_eq!(unknown_command_hint("/mondy please"), Some("Unknown command: /mondy".to_string()));
        assert_eq!(unknown_command_hint("hello"), None);
    }
}
