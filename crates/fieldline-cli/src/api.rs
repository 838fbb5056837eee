//! Fieldline API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Profile;

/// API Client for Fieldline
pub struct FieldlineClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Request/Response Types
// ============================================

#[derive(Debug, Serialize)]
pub struct UserContext {
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_site_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl From<&Profile> for UserContext {
    fn from(profile: &Profile) -> Self {
        Self {
            user_id: profile.user_id,
            full_name: profile.name.clone(),
            primary_site_id: profile.primary_site_id,
            role: profile.role.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProcessRequest<'a> {
    pub text: &'a str,
    pub user_context: UserContext,
}

#[derive(Debug, Deserialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub response: String,
    pub intent: String,
    pub confidence: Option<f32>,
    pub action_taken: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct TaskResponse {
    pub display_id: String,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SiteResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub location: Option<String>,
    pub sop_document_link: Option<String>,
}

impl FieldlineClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        resp.json().await.context("Failed to parse response")
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Check the key against a protected endpoint
    pub async fn verify_key(&self) -> Result<bool> {
        let url = format!("{}/api/health/database", self.base_url);
        let resp = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .context("Failed to connect to Fieldline API")?;
        Ok(resp.status() != reqwest::StatusCode::UNAUTHORIZED)
    }

    /// Route free text through the orchestrator
    pub async fn process(&self, text: &str, profile: &Profile) -> Result<ProcessResponse> {
        let url = format!("{}/api/nlp/process", self.base_url);
        let request = ProcessRequest {
            text,
            user_context: profile.into(),
        };

        tracing::debug!(url = %url, "Sending text");
        let resp = self
            .authorized(self.client.post(&url))
            .json(&request)
            .send()
            .await
            .context("Failed to connect to Fieldline API")?;

        Self::read_json(resp).await
    }

    /// Tasks assigned to a user, newest first
    pub async fn list_tasks(
        &self,
        user_id: Uuid,
        status: Option<&str>,
        limit: usize,
    ) -> Result<Vec<TaskResponse>> {
        let mut url = format!("{}/api/tasks/user/{}?limit={}", self.base_url, user_id, limit);
        if let Some(status) = status {
            url.push_str(&format!("&status={}", urlencoding::encode(status)));
        }

        let resp = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .context("Failed to connect to Fieldline API")?;

        Self::read_json(resp).await
    }

    /// Active sites, optionally filtered by a search term
    pub async fn list_sites(&self, search: Option<&str>) -> Result<Vec<SiteResponse>> {
        let url = match search {
            Some(q) => format!("{}/api/sites/search?q={}", self.base_url, urlencoding::encode(q)),
            None => format!("{}/api/sites", self.base_url),
        };

        let resp = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .context("Failed to connect to Fieldline API")?;

        Self::read_json(resp).await
    }
}
