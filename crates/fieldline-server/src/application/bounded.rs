//! Timeout decorators for external services
//!
//! Every call that leaves the process goes through one of these wrappers,
//! so a stalled downstream surfaces as `DomainError::Timeout` instead of
//! blocking the pipeline.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use fieldline::{
    DocumentStorage, DomainError, Extraction, ExtractionMode, Site, StructuredExtractor,
    TaskExtraction, TaskSyncService,
};

/// Await `call`, failing with `DomainError::Timeout` after `limit`
pub async fn within<T, F>(service: &str, limit: Duration, call: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(service = %service, after_ms = limit.as_millis() as u64, "External call timed out");
            Err(DomainError::timeout(service, limit))
        }
    }
}

pub struct BoundedExtractor {
    inner: Arc<dyn StructuredExtractor>,
    limit: Duration,
}

impl BoundedExtractor {
    pub fn new(inner: Arc<dyn StructuredExtractor>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl StructuredExtractor for BoundedExtractor {
    async fn extract(&self, text: &str, mode: ExtractionMode) -> Result<Extraction, DomainError> {
        within(self.inner.name(), self.limit, self.inner.extract(text, mode)).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

pub struct BoundedTaskSync {
    inner: Arc<dyn TaskSyncService>,
    limit: Duration,
}

impl BoundedTaskSync {
    pub fn new(inner: Arc<dyn TaskSyncService>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl TaskSyncService for BoundedTaskSync {
    async fn create_from_text(&self, text: &str) -> Result<TaskExtraction, DomainError> {
        within(self.inner.name(), self.limit, self.inner.create_from_text(text)).await
    }

    async fn complete(&self, external_id: &str) -> Result<bool, DomainError> {
        within(self.inner.name(), self.limit, self.inner.complete(external_id)).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

pub struct BoundedDocumentStorage {
    inner: Arc<dyn DocumentStorage>,
    limit: Duration,
}

impl BoundedDocumentStorage {
    pub fn new(inner: Arc<dyn DocumentStorage>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl DocumentStorage for BoundedDocumentStorage {
    async fn create_site_sop(&self, site: &Site) -> Result<String, DomainError> {
        within("document storage", self.limit, self.inner.create_site_sop(site)).await
    }
}
