//! Google Drive document storage
//!
//! Creates site SOP documents through the Drive v3 REST API. Access tokens
//! come from an OAuth refresh token and are cached until shortly before
//! they expire.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use fieldline::{DocumentStorage, DomainError, Site};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const GOOGLE_DOC_MIME: &str = "application/vnd.google-apps.document";
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// OAuth client credentials for Drive
#[derive(Debug, Clone)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

pub struct GoogleDriveStorage {
    client: Client,
    credentials: GoogleCredentials,
    share_domain: Option<String>,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleDriveStorage {
    pub fn new(credentials: GoogleCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
            share_domain: None,
            token: Mutex::new(None),
        }
    }

    /// Grant writer access to everyone in this domain on new documents
    pub fn with_share_domain(mut self, domain: Option<String>) -> Self {
        self.share_domain = domain.filter(|d| !d.trim().is_empty());
        self
    }

    async fn access_token(&self) -> Result<String, DomainError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() {
                return Ok(token.access_token.clone());
            }
        }

        let request = RefreshRequest {
            client_id: &self.credentials.client_id,
            client_secret: &self.credentials.client_secret,
            refresh_token: &self.credentials.refresh_token,
            grant_type: "refresh_token",
        };

        let response = self
            .client
            .post(TOKEN_URL)
            .form(&request)
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Token refresh failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::ExternalService(format!(
                "Token refresh rejected ({status}): {body}"
            )));
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Invalid token response: {e}")))?;

        let lifetime = Duration::from_secs(refreshed.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        let expires_at = Utc::now()
            + chrono::Duration::from_std(lifetime).unwrap_or_else(|_| chrono::Duration::zero());

        *cached = Some(CachedToken {
            access_token: refreshed.access_token.clone(),
            expires_at,
        });

        Ok(refreshed.access_token)
    }

    async fn share_with_domain(&self, token: &str, file_id: &str, domain: &str) {
        let permission = Permission {
            kind: "domain",
            role: "writer",
            domain,
        };

        let result = self
            .client
            .post(format!("{}/{}/permissions", DRIVE_FILES_URL, file_id))
            .bearer_auth(token)
            .json(&permission)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => {
                tracing::warn!(file_id = %file_id, status = %resp.status(), "Failed to share SOP document");
            }
            Err(e) => {
                tracing::warn!(file_id = %file_id, error = %e, "Failed to share SOP document");
            }
        }
    }
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
    grant_type: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateFileRequest<'a> {
    name: String,
    mime_type: &'a str,
}

#[derive(Deserialize)]
struct CreatedFile {
    id: String,
}

#[derive(Serialize)]
struct Permission<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    role: &'a str,
    domain: &'a str,
}

pub fn sop_title(site: &Site) -> String {
    format!("SOP - {}", site.name)
}

pub fn document_link(file_id: &str) -> String {
    format!("https://docs.google.com/document/d/{}/edit", file_id)
}

#[async_trait]
impl DocumentStorage for GoogleDriveStorage {
    async fn create_site_sop(&self, site: &Site) -> Result<String, DomainError> {
        let token = self.access_token().await?;

        let request = CreateFileRequest {
            name: sop_title(site),
            mime_type: GOOGLE_DOC_MIME,
        };

        let response = self
            .client
            .post(DRIVE_FILES_URL)
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Drive request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::ExternalService(format!(
                "Drive API error ({status}): {body}"
            )));
        }

        let file: CreatedFile = response
            .json()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Invalid Drive response: {e}")))?;

        if let Some(domain) = &self.share_domain {
            self.share_with_domain(&token, &file.id, domain).await;
        }

        tracing::info!(site = %site.name, file_id = %file.id, "Created SOP document");
        Ok(document_link(&file.id))
    }
}
