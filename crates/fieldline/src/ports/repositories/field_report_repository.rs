//! Field Report Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, FieldReport, NewFieldReport};

/// Repository interface for FieldReport entities
#[async_trait]
pub trait FieldReportRepository: Send + Sync {
    async fn insert(&self, report: &NewFieldReport) -> Result<FieldReport, DomainError>;

    /// Most recent reports for a site, newest first
    async fn find_recent_by_site(
        &self,
        site_id: Uuid,
        limit: usize,
    ) -> Result<Vec<FieldReport>, DomainError>;

    /// Most recent reports by a submitter, newest first
    async fn find_recent_by_submitter(
        &self,
        submitter_id: Uuid,
        limit: usize,
    ) -> Result<Vec<FieldReport>, DomainError>;
}
