//! Chat Integration Port
//!
//! Abstract interface for the messaging platforms technicians talk to
//! the router through. Implementations live in separate crates
//! (e.g. fieldline-integration-telegram).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Chat platform integration interface
#[async_trait]
pub trait ChatIntegration: Send + Sync {
    /// Send a message to a chat/conversation
    async fn post_message(&self, channel_id: &str, content: &str) -> Result<(), DomainError>;

    /// Get the integration name (e.g., "telegram")
    fn name(&self) -> &str;

    /// Parse a platform webhook payload.
    /// Returns `None` if the event doesn't require action.
    async fn handle_webhook(
        &self,
        _payload: &[u8],
    ) -> Result<Option<IntegrationEvent>, DomainError> {
        Ok(None)
    }

    /// Check if the integration is connected and healthy
    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}

/// Events received from chat platforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntegrationEvent {
    /// A text message was received
    MessageReceived {
        channel_id: String,
        user_id: String,
        user_name: String,
        content: String,
        /// Platform-specific metadata
        #[serde(default)]
        metadata: serde_json::Value,
    },

    /// A slash command was invoked
    SlashCommand {
        command: String,
        user_id: String,
        user_name: String,
        channel_id: String,
        /// Command arguments
        args: Vec<String>,
    },
}

impl IntegrationEvent {
    pub fn channel_id(&self) -> &str {
        match self {
            Self::MessageReceived { channel_id, .. } => channel_id,
            Self::SlashCommand { channel_id, .. } => channel_id,
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            Self::MessageReceived { user_id, .. } => user_id,
            Self::SlashCommand { user_id, .. } => user_id,
        }
    }
}
