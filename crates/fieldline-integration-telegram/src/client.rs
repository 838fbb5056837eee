//! Telegram Bot API client wrapper

use teloxide::prelude::*;
use teloxide::types::{ChatId, Me, Recipient};
use teloxide::RequestError;
use tracing::{debug, error};

use crate::config::TelegramConfig;

/// Telegram API client
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            bot: Bot::new(config.token.clone()),
        }
    }

    /// Send a plain-text message to a chat
    pub async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), RequestError> {
        debug!(chat_id = %chat_id, content_len = %text.len(), "Sending message to Telegram");

        self.bot
            .send_message(Recipient::Id(ChatId(chat_id)), text)
            .await
            .inspect_err(|e| {
                error!(chat_id = %chat_id, error = %e, "Failed to send Telegram message")
            })?;

        Ok(())
    }

    /// Identity of the bot behind the token
    pub async fn get_me(&self) -> Result<Me, RequestError> {
        self.bot.get_me().await
    }

    /// Get the underlying teloxide bot for advanced operations
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}
