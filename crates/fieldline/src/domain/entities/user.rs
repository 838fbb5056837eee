//! User - a registered technician, manager or admin

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CallerContext;

/// Registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub display_id: String,
    /// Chat platform id (Telegram user id)
    pub external_channel_id: Option<String>,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub primary_site_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Context handed to the router once this user is authenticated
    pub fn caller_context(&self) -> CallerContext {
        CallerContext {
            caller_id: self.id,
            external_channel_id: self.external_channel_id.clone(),
            primary_site_id: self.primary_site_id,
            role: self.role.clone(),
            display_name: self.full_name(),
        }
    }
}
