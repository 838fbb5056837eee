//! Site Application Service (Use Case)
//!
//! Site lookups and SOP document provisioning.

use std::sync::Arc;

use uuid::Uuid;

use fieldline::{DocumentStorage, DomainError, RecordStore, Site};

/// Application service for site operations
pub struct SiteService {
    store: RecordStore,
    documents: Option<Arc<dyn DocumentStorage>>,
}

impl SiteService {
    pub fn new(store: RecordStore, documents: Option<Arc<dyn DocumentStorage>>) -> Self {
        Self { store, documents }
    }

    pub async fn list_active(&self) -> Result<Vec<Site>, DomainError> {
        self.store.sites.list_active().await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Site>, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::Validation(
                "Search query is required".to_string(),
            ));
        }
        self.store.sites.search(query).await
    }

    /// Create an SOP document for the site and record its link
    pub async fn create_sop(&self, site_id: Uuid) -> Result<Site, DomainError> {
        let documents = self.documents.as_ref().ok_or_else(|| {
            DomainError::ExternalService("Document storage is not configured".to_string())
        })?;

        let site = self
            .store
            .sites
            .find_by_id(site_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Site", site_id))?;

        let link = documents.create_site_sop(&site).await?;
        tracing::info!(site = %site.name, link = %link, "Created SOP document");

        self.store
            .sites
            .set_sop_link(site.id, &link)
            .await?
            .ok_or_else(|| DomainError::not_found("Site", site_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FakeDocumentStorage, InMemoryStore};

    #[tokio::test]
    async fn test_search_matches_alias_and_rejects_blank() {
        let store = InMemoryStore::new();
        store.add_site("Alpha", &["North Pad"]);
        store.add_site("Beta", &[]);
        let service = SiteService::new(store.record_store(), None);

        let found = service.search("north").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Alpha");

        assert!(matches!(
            service.search("  ").await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_sop_records_link() {
        let store = InMemoryStore::new();
        let site = store.add_site("Alpha", &[]);
        let service = SiteService::new(
            store.record_store(),
            Some(Arc::new(FakeDocumentStorage::default())),
        );

        let updated = service.create_sop(site.id).await.unwrap();

        assert_eq!(
            updated.sop_document_link.as_deref(),
            Some("https://docs.google.com/document/d/alpha/edit")
        );
    }

    #[tokio::test]
    async fn test_create_sop_failure_leaves_site_untouched() {
        let store = InMemoryStore::new();
        let site = store.add_site("Alpha", &[]);
        let service = SiteService::new(
            store.record_store(),
            Some(Arc::new(FakeDocumentStorage::failing())),
        );

        assert!(service.create_sop(site.id).await.is_err());
        assert!(store.sites.lock().unwrap()[0].sop_document_link.is_none());
    }

    #[tokio::test]
    async fn test_create_sop_without_storage() {
        let store = InMemoryStore::new();
        let site = store.add_site("Alpha", &[]);
        let service = SiteService::new(store.record_store(), None);

        assert!(matches!(
            service.create_sop(site.id).await,
            Err(DomainError::ExternalService(_))
        ));
    }
}
