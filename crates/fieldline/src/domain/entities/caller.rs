//! CallerContext - who is asking

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated caller. Immutable for the lifetime of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerContext {
    pub caller_id: Uuid,
    pub external_channel_id: Option<String>,
    pub primary_site_id: Option<Uuid>,
    pub role: String,
    pub display_name: String,
}

impl CallerContext {
    pub fn new(caller_id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            caller_id,
            external_channel_id: None,
            primary_site_id: None,
            role: "technician".to_string(),
            display_name: display_name.into(),
        }
    }

    pub fn with_primary_site(mut self, site_id: Option<Uuid>) -> Self {
        self.primary_site_id = site_id;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_external_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.external_channel_id = Some(channel_id.into());
        self
    }
}
