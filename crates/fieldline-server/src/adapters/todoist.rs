//! Todoist REST client
//!
//! Task-sync service: Todoist parses natural-language task text (dates,
//! priorities) on creation and keeps a mirrored copy we close on completion.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use fieldline::{DomainError, TaskExtraction, TaskSyncService};

use super::llm_extractor::{parse_date, parse_datetime};

const BASE_URL: &str = "https://api.todoist.com/rest/v2";

#[derive(Clone)]
pub struct TodoistClient {
    client: Client,
    api_token: String,
}

impl TodoistClient {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_token: api_token.into(),
        }
    }
}

#[derive(Serialize)]
struct CreateTaskRequest<'a> {
    content: &'a str,
    description: String,
}

#[derive(Deserialize)]
struct TodoistTask {
    id: String,
    content: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    priority: Option<u8>,
    #[serde(default)]
    due: Option<TodoistDue>,
}

#[derive(Deserialize)]
struct TodoistDue {
    date: String,
    #[serde(default)]
    datetime: Option<String>,
}

impl From<TodoistTask> for TaskExtraction {
    fn from(task: TodoistTask) -> Self {
        let (due_date, due_datetime) = match &task.due {
            Some(due) => (
                parse_date(&due.date),
                due.datetime.as_deref().and_then(parse_datetime),
            ),
            None => (None, None),
        };

        Self {
            title: task.content,
            description: Some(task.description).filter(|d| !d.is_empty()),
            due_date,
            due_datetime,
            priority: task.priority,
            external_id: Some(task.id),
        }
    }
}

#[async_trait]
impl TaskSyncService for TodoistClient {
    async fn create_from_text(&self, text: &str) -> Result<TaskExtraction, DomainError> {
        let request = CreateTaskRequest {
            content: text,
            description: format!("Created via Fieldline at {}", Utc::now().to_rfc3339()),
        };

        let response = self
            .client
            .post(format!("{}/tasks", BASE_URL))
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Todoist request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Extraction(format!(
                "Todoist API error ({status}): {body}"
            )));
        }

        let task: TodoistTask = response
            .json()
            .await
            .map_err(|e| DomainError::Extraction(format!("Invalid Todoist response: {e}")))?;

        tracing::info!(external_id = %task.id, "Created task in Todoist");
        Ok(task.into())
    }

    async fn complete(&self, external_id: &str) -> Result<bool, DomainError> {
        let response = self
            .client
            .post(format!("{}/tasks/{}/close", BASE_URL, external_id))
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| DomainError::SyncMirror(format!("Todoist request failed: {e}")))?;

        if response.status().is_success() {
            tracing::info!(external_id = %external_id, "Completed Todoist task");
            Ok(true)
        } else {
            tracing::warn!(
                external_id = %external_id,
                status = %response.status(),
                "Todoist refused to close task"
            );
            Ok(false)
        }
    }

    fn name(&self) -> &str {
        "todoist"
    }
}
