//! Site - a physical location technicians work at

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Site record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: Uuid,
    pub name: String,
    /// Alternative names used in free text ("alpha", "site a")
    pub aliases: Vec<String>,
    pub location: Option<String>,
    pub is_active: bool,
    pub sop_document_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Site {
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    pub fn has_alias(&self, name: &str) -> bool {
        let name = name.trim();
        self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}
