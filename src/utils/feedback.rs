use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId, ParseMode};
use reqwest::Url;

use crate::utils::html::escape_html;
use crate::utils::message_split::{chunk_for_delivery, MAX_MESSAGE_LENGTH};

/// Longest reply still sent as a photo caption.
pub const MAX_CAPTION_LENGTH: usize = 1000;

/// Feedback types for different command outcomes
#[derive(Debug, Clone)]
pub enum FeedbackType {
    Error,
    Processing,
}

impl FeedbackType {
    fn emoji(&self) -> &'static str {
        match self {
            FeedbackType::Error => "❌",
            FeedbackType::Processing => "⏳",
        }
    }
}

/// Prefixes an escaped plain-text message with its feedback emoji.
pub fn format_feedback(feedback_type: &FeedbackType, message: &str) -> String {
    format!("{} {}", feedback_type.emoji(), escape_html(message))
}

/// Centralized reply helper for bot commands
pub struct CommandFeedback {
    bot: Bot,
    chat_id: ChatId,
}

impl CommandFeedback {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    /// Send a plain-text feedback message
    pub async fn send(&self, feedback_type: FeedbackType, message: &str) -> ResponseResult<Message> {
        self.send_html(&format_feedback(&feedback_type, message)).await
    }

    /// Send pre-rendered HTML as one message
    pub async fn send_html(&self, html: &str) -> ResponseResult<Message> {
        self.bot
            .send_message(self.chat_id, html)
            .parse_mode(ParseMode::Html)
            .await
    }

    /// Send a processing message that is removed once the command finishes
    pub async fn send_processing(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Processing, message).await
    }

    /// Send error feedback
    pub async fn error(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Error, message).await
    }

    /// Send validation error with helpful suggestion
    pub async fn validation_error(&self, error: &str, suggestion: &str) -> ResponseResult<Message> {
        let message = format!("{error}\n\n💡 Suggestion: {suggestion}");
        self.send(FeedbackType::Error, &message).await
    }

    /// Delete a message, logging instead of failing when that is not allowed
    pub async fn delete_quietly(&self, message_id: MessageId) {
        if let Err(e) = self.bot.delete_message(self.chat_id, message_id).await {
            tracing::debug!("Could not delete message {} in chat {}: {}", message_id.0, self.chat_id.0, e);
        }
    }

    /// Send HTML split into framed chunks that fit Telegram's length limit
    pub async fn send_long(&self, html: &str) -> ResponseResult<()> {
        for chunk in chunk_for_delivery(html, MAX_MESSAGE_LENGTH) {
            self.send_html(&chunk).await?;
        }
        Ok(())
    }

    /// Send a listing as a photo caption when short, as text messages otherwise
    pub async fn send_listing(&self, html: &str, image: &Url) -> ResponseResult<()> {
        if html.chars().count() > MAX_CAPTION_LENGTH {
            return self.send_long(html).await;
        }

        self.send_photo(image, html).await?;
        Ok(())
    }

    /// Send a photo with an HTML caption
    pub async fn send_photo(&self, image: &Url, caption: &str) -> ResponseResult<Message> {
        self.bot
            .send_photo(self.chat_id, InputFile::url(image.clone()))
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .await
    }
}
