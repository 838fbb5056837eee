//! Site Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Site};

/// Repository interface for Site entities
#[async_trait]
pub trait SiteRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Site>, DomainError>;

    /// Exact name match first, then alias match (both case-insensitive)
    async fn find_by_name_or_alias(&self, name: &str) -> Result<Option<Site>, DomainError>;

    /// Active sites ordered by name
    async fn list_active(&self) -> Result<Vec<Site>, DomainError>;

    /// Substring search over names, aliases and locations
    async fn search(&self, query: &str) -> Result<Vec<Site>, DomainError>;

    /// Record the SOP document link for a site
    async fn set_sop_link(&self, id: Uuid, link: &str) -> Result<Option<Site>, DomainError>;
}
