//! Telegram webhook handling

use fieldline::{DomainError, IntegrationEvent};
use teloxide::types::Message;
use tracing::debug;

/// Header Telegram uses to echo the secret given to `setWebhook`
pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Parses raw webhook updates into integration events
#[derive(Debug, Default)]
pub struct TelegramWebhookHandler;

impl TelegramWebhookHandler {
    pub fn new() -> Self {
        Self
    }

    /// Parse an `Update` body.
    ///
    /// Returns `None` for updates that carry no actionable text: edits,
    /// callbacks, bot authors, stickers and other non-text messages.
    pub fn parse_update(&self, payload: &[u8]) -> Result<Option<IntegrationEvent>, DomainError> {
        let update: serde_json::Value = serde_json::from_slice(payload)
            .map_err(|e| DomainError::Validation(format!("Invalid JSON in webhook: {}", e)))?;

        let Some(raw_message) = update.get("message") else {
            debug!("Ignoring Telegram update without a message");
            return Ok(None);
        };

        let msg: Message = serde_json::from_value(raw_message.clone())
            .map_err(|e| DomainError::Validation(format!("Invalid Telegram message: {}", e)))?;

        Ok(self.to_event(&msg))
    }

    fn to_event(&self, msg: &Message) -> Option<IntegrationEvent> {
        let user = msg.from.as_ref()?;
        if user.is_bot {
            debug!(user_id = %user.id.0, "Ignoring message from bot");
            return None;
        }

        let Some(text) = msg.text() else {
            debug!(msg_id = msg.id.0, "Ignoring non-text Telegram message");
            return None;
        };

        let channel_id = msg.chat.id.0.to_string();
        let user_id = user.id.0.to_string();
        let user_name = user.first_name.clone();

        if let Some(command_line) = text.strip_prefix('/') {
            let mut parts = command_line.split_whitespace();
            let command = parts
                .next()
                .unwrap_or_default()
                .split('@')
                .next()
                .unwrap_or_default()
                .to_lowercase();
            let args = parts.map(str::to_string).collect();

            return Some(IntegrationEvent::SlashCommand {
                command,
                user_id,
                user_name,
                channel_id,
                args,
            });
        }

        Some(IntegrationEvent::MessageReceived {
            channel_id,
            user_id,
            user_name,
            content: text.to_string(),
            metadata: serde_json::json!({
                "message_id": msg.id.0,
                "username": user.username,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(from: serde_json::Value, text: Option<&str>) -> Vec<u8> {
        let mut message = serde_json::json!({
            "message_id": 7,
            "date": 1700000000i64,
            "chat": {
                "id": 4242i64,
                "type": "private",
                "first_name": "Dana",
            },
            "from": from,
        });
        match text {
            Some(text) => message["text"] = serde_json::json!(text),
            None => {
                message["location"] = serde_json::json!({ "latitude": 51.5, "longitude": -0.12 })
            }
        }
        serde_json::to_vec(&serde_json::json!({ "update_id": 1, "message": message })).unwrap()
    }

    fn human() -> serde_json::Value {
        serde_json::json!({
            "id": 4242u64,
            "is_bot": false,
            "first_name": "Dana",
            "username": "dana_tech",
        })
    }

    #[test]
    fn test_parse_text_message() {
        let handler = TelegramWebhookHandler::new();
        let event = handler
            .parse_update(&update(human(), Some("Show my tasks")))
            .unwrap();

        match event {
            Some(IntegrationEvent::MessageReceived {
                channel_id,
                user_id,
                user_name,
                content,
                metadata,
            }) => {
                assert_eq!(channel_id, "4242");
                assert_eq!(user_id, "4242");
                assert_eq!(user_name, "Dana");
                assert_eq!(content, "Show my tasks");
                assert_eq!(metadata["username"], "dana_tech");
            }
            other => panic!("Expected MessageReceived event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_command_with_bot_suffix() {
        let handler = TelegramWebhookHandler::new();
        let event = handler
            .parse_update(&update(human(), Some("/Status@fieldline_bot now")))
            .unwrap();

        match event {
            Some(IntegrationEvent::SlashCommand { command, args, .. }) => {
                assert_eq!(command, "status");
                assert_eq!(args, vec!["now".to_string()]);
            }
            other => panic!("Expected SlashCommand event, got {:?}", other),
        }
    }

    #[test]
    fn test_ignore_bot_messages() {
        let handler = TelegramWebhookHandler::new();
        let bot = serde_json::json!({
            "id": 99u64,
            "is_bot": true,
            "first_name": "OtherBot",
        });

        assert!(handler
            .parse_update(&update(bot, Some("hello")))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_ignore_non_text_and_non_message_updates() {
        let handler = TelegramWebhookHandler::new();
        assert!(handler.parse_update(&update(human(), None)).unwrap().is_none());

        let callback = serde_json::to_vec(&serde_json::json!({ "update_id": 2 })).unwrap();
        assert!(handler.parse_update(&callback).unwrap().is_none());
    }

    #[test]
    fn test_reject_garbage() {
        let handler = TelegramWebhookHandler::new();
        assert!(matches!(
            handler.parse_update(b"not json"),
            Err(DomainError::Validation(_))
        ));
    }
}
