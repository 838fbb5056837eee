//! Chat Application Service (Use Case)
//!
//! Runs chat-transport events through the router: authenticates the
//! sender by external channel id, enforces the message length cap,
//! answers slash commands and delivers the decorated reply.

use std::sync::Arc;

use chrono::Utc;

use fieldline::{ChatIntegration, DomainError, IntegrationEvent, RecordStore, TaskQuery, User};
use fieldline_integration_telegram::commands::{
    self, Command, StatusCard, NOT_REGISTERED, PROCESSING_FAILURE, STATUS_NOT_REGISTERED,
    STATUS_UNAVAILABLE,
};

use super::orchestrator::Orchestrator;

const STATUS_TASK_LIMIT: usize = 5;

pub struct ChatService {
    orchestrator: Arc<Orchestrator>,
    store: RecordStore,
    chat: Arc<dyn ChatIntegration>,
    max_message_length: usize,
}

impl ChatService {
    pub fn new(
        orchestrator: Arc<Orchestrator>,
        store: RecordStore,
        chat: Arc<dyn ChatIntegration>,
        max_message_length: usize,
    ) -> Self {
        Self {
            orchestrator,
            store,
            chat,
            max_message_length,
        }
    }

    /// Parse a raw webhook body, answer it and deliver the reply
    pub async fn handle_update(&self, payload: &[u8]) -> Result<(), DomainError> {
        let Some(event) = self.chat.handle_webhook(payload).await? else {
            return Ok(());
        };

        if let Some(reply) = self.reply_to(&event).await {
            self.chat.post_message(event.channel_id(), &reply).await?;
        }
        Ok(())
    }

    /// Reply text for an event, `None` when the event needs no answer
    pub async fn reply_to(&self, event: &IntegrationEvent) -> Option<String> {
        match event {
            IntegrationEvent::MessageReceived {
                user_id, content, ..
            } => self.reply_to_message(user_id, content).await,
            IntegrationEvent::SlashCommand {
                command,
                user_id,
                user_name,
                ..
            } => match Command::parse(command) {
                Some(command) => Some(self.reply_to_command(command, user_id, user_name).await),
                None => {
                    tracing::debug!(command = %command, "Ignoring unknown command");
                    None
                }
            },
        }
    }

    async fn reply_to_message(&self, external_id: &str, content: &str) -> Option<String> {
        let text = content;
        if text.trim().is_empty() {
            return None;
        }

        let user = match self.authenticate(external_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return Some(NOT_REGISTERED.to_string()),
            Err(_) => return Some(PROCESSING_FAILURE.to_string()),
        };

        if text.chars().count() > self.max_message_length {
            return Some(commands::message_too_long(self.max_message_length));
        }

        tracing::info!(
            caller_id = %user.id,
            external_id = %external_id,
            "Message received: {}",
            preview(text)
        );

        let envelope = self
            .orchestrator
            .process(text, &user.caller_context())
            .await;

        tracing::info!(
            caller_id = %user.id,
            intent = %envelope.intent,
            success = envelope.success,
            "Message processed"
        );

        Some(commands::decorate_reply(&envelope))
    }

    async fn reply_to_command(&self, command: Command, external_id: &str, name: &str) -> String {
        tracing::info!(external_id = %external_id, command = ?command, "Command received");

        match command {
            Command::Help => commands::HELP_MESSAGE.to_string(),
            Command::Start => match self.authenticate(external_id).await {
                Ok(Some(user)) => commands::welcome_back(&user.first_name),
                Ok(None) => commands::welcome_unregistered(name, external_id),
                Err(_) => PROCESSING_FAILURE.to_string(),
            },
            Command::Status => match self.authenticate(external_id).await {
                Ok(Some(user)) => match self.status_card(&user).await {
                    Ok(card) => card,
                    Err(e) => {
                        tracing::error!(caller_id = %user.id, error = %e, "Status lookup failed");
                        STATUS_UNAVAILABLE.to_string()
                    }
                },
                Ok(None) => STATUS_NOT_REGISTERED.to_string(),
                Err(_) => STATUS_UNAVAILABLE.to_string(),
            },
        }
    }

    async fn authenticate(&self, external_id: &str) -> Result<Option<User>, DomainError> {
        self.store
            .users
            .find_by_external_channel_id(external_id)
            .await
            .inspect_err(|e| {
                tracing::error!(external_id = %external_id, error = %e, "User lookup failed")
            })
    }

    async fn status_card(&self, user: &User) -> Result<String, DomainError> {
        let primary_site = match user.primary_site_id {
            Some(site_id) => self.store.sites.find_by_id(site_id).await?,
            None => None,
        };

        let query = TaskQuery {
            status: None,
            limit: Some(STATUS_TASK_LIMIT),
        };
        let tasks = self.store.tasks.find_for_assignee(user.id, &query).await?;
        let full_name = user.full_name();

        Ok(StatusCard {
            full_name: &full_name,
            role: &user.role,
            display_id: &user.display_id,
            primary_site: primary_site.as_ref().map(|s| s.name.as_str()),
            recent_tasks: &tasks,
        }
        .render(Utc::now()))
    }
}

fn preview(text: &str) -> String {
    text.chars().take(100).collect()
}
