//! NLP processing DTOs

use chrono::{DateTime, Utc};
use fieldline::{CallerContext, ResponseEnvelope};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const PROCESSED_BY: &str = "orchestrator";

/// Who is asking, as supplied by the API client
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UserContext {
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub primary_site_id: Option<Uuid>,
    pub role: Option<String>,
    pub external_channel_id: Option<String>,
}

impl UserContext {
    /// `default_site` fills in a missing primary site
    pub fn into_caller(self, default_site: Option<Uuid>) -> CallerContext {
        let caller = CallerContext::new(self.user_id, self.full_name.unwrap_or_default())
            .with_primary_site(self.primary_site_id.or(default_site));
        let caller = match self.role {
            Some(role) => caller.with_role(role),
            None => caller,
        };
        match self.external_channel_id {
            Some(channel) => caller.with_external_channel(channel),
            None => caller,
        }
    }
}

/// Process free text request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessRequest {
    pub text: String,
    pub user_context: UserContext,
}

/// Router answer plus processing details
#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessResponse {
    pub success: bool,
    pub response: String,
    pub intent: String,
    pub confidence: Option<f32>,
    pub action_taken: Option<String>,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    pub processed_by: String,
}

impl From<ResponseEnvelope> for ProcessResponse {
    fn from(envelope: ResponseEnvelope) -> Self {
        Self {
            success: envelope.success,
            response: envelope.response,
            intent: envelope.intent.as_str().to_string(),
            confidence: envelope.confidence,
            action_taken: envelope.action_taken.map(|a| a.as_str().to_string()),
            metadata: envelope.metadata,
            timestamp: Utc::now(),
            processed_by: PROCESSED_BY.to_string(),
        }
    }
}
