//! Telegram configuration

use serde::{Deserialize, Serialize};

/// Configuration for Telegram integration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub token: String,
    /// Shared secret Telegram echoes in `X-Telegram-Bot-Api-Secret-Token`
    pub webhook_secret: Option<String>,
}

impl TelegramConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            webhook_secret: None,
        }
    }

    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    /// Without a configured secret every request passes
    pub fn verify_secret(&self, header: Option<&str>) -> bool {
        match &self.webhook_secret {
            None => true,
            Some(expected) => header == Some(expected.as_str()),
        }
    }
}
