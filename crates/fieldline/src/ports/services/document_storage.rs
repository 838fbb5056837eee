//! Document Storage Port
//!
//! Creates standard operating procedure documents for sites.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Site};

/// Document storage interface
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Create an SOP document for the site and return a shareable link
    async fn create_site_sop(&self, site: &Site) -> Result<String, DomainError>;
}
