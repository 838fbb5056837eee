//! ChatIntegration implementation for Telegram

use async_trait::async_trait;
use fieldline::{ChatIntegration, DomainError, IntegrationEvent};
use tracing::{debug, warn};

use crate::client::TelegramClient;
use crate::config::TelegramConfig;
use crate::webhook::TelegramWebhookHandler;

/// Telegram integration implementing the ChatIntegration port
pub struct TelegramIntegration {
    client: TelegramClient,
    webhook: TelegramWebhookHandler,
    config: TelegramConfig,
}

impl TelegramIntegration {
    pub fn new(config: TelegramConfig) -> Self {
        let client = TelegramClient::new(&config);
        Self {
            client,
            webhook: TelegramWebhookHandler::new(),
            config,
        }
    }

    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    fn parse_chat_id(channel_id: &str) -> Result<i64, DomainError> {
        channel_id.parse::<i64>().map_err(|_| {
            DomainError::Validation(format!("Invalid Telegram chat id: {}", channel_id))
        })
    }
}

#[async_trait]
impl ChatIntegration for TelegramIntegration {
    async fn post_message(&self, channel_id: &str, content: &str) -> Result<(), DomainError> {
        let chat_id = Self::parse_chat_id(channel_id)?;

        self.client
            .send_text(chat_id, content)
            .await
            .map_err(|e| DomainError::ExternalService(format!("Telegram API error: {}", e)))
    }

    fn name(&self) -> &str {
        "telegram"
    }

    async fn handle_webhook(
        &self,
        payload: &[u8],
    ) -> Result<Option<IntegrationEvent>, DomainError> {
        let event = self.webhook.parse_update(payload)?;
        if let Some(event) = &event {
            debug!(channel_id = %event.channel_id(), "Parsed Telegram update");
        }
        Ok(event)
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        match self.client.get_me().await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!(error = %e, "Telegram health check failed");
                Ok(false)
            }
        }
    }
}
