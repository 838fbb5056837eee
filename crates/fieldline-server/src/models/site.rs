//! Site DTOs

use chrono::{DateTime, Utc};
use fieldline::Site;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Site response
#[derive(Debug, Serialize, ToSchema)]
pub struct SiteResponse {
    pub id: Uuid,
    pub name: String,
    pub aliases: Vec<String>,
    pub location: Option<String>,
    pub is_active: bool,
    pub sop_document_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Site> for SiteResponse {
    fn from(site: Site) -> Self {
        Self {
            id: site.id,
            name: site.name,
            aliases: site.aliases,
            location: site.location,
            is_active: site.is_active,
            sop_document_link: site.sop_document_link,
            created_at: site.created_at,
        }
    }
}

/// Query parameters for site search
#[derive(Debug, Deserialize, IntoParams)]
pub struct SiteSearchQuery {
    /// Matched against name, aliases and location
    pub q: String,
}

/// Link to a freshly created SOP document
#[derive(Debug, Serialize, ToSchema)]
pub struct SopResponse {
    pub site_id: Uuid,
    pub sop_document_link: String,
}
