//! Extraction routing
//!
//! Classification and field-report extraction go to the language model.
//! Task extraction goes to the task-sync service when one is configured,
//! so the parsed task carries the external id; otherwise to the model.

use std::sync::Arc;

use async_trait::async_trait;

use fieldline::{DomainError, Extraction, ExtractionMode, StructuredExtractor, TaskSyncService};

pub struct ExtractionRouter {
    llm: Option<Arc<dyn StructuredExtractor>>,
    task_sync: Option<Arc<dyn TaskSyncService>>,
}

impl ExtractionRouter {
    pub fn new(
        llm: Option<Arc<dyn StructuredExtractor>>,
        task_sync: Option<Arc<dyn TaskSyncService>>,
    ) -> Self {
        Self { llm, task_sync }
    }

    fn llm(&self, mode: ExtractionMode) -> Result<&Arc<dyn StructuredExtractor>, DomainError> {
        self.llm.as_ref().ok_or_else(|| {
            DomainError::Extraction(format!("no language model configured for {} extraction", mode))
        })
    }
}

#[async_trait]
impl StructuredExtractor for ExtractionRouter {
    async fn extract(&self, text: &str, mode: ExtractionMode) -> Result<Extraction, DomainError> {
        match (mode, &self.task_sync) {
            (ExtractionMode::Task, Some(sync)) => {
                tracing::debug!(service = %sync.name(), "Routing task extraction to task sync");
                sync.create_from_text(text).await.map(Extraction::Task)
            }
            _ => self.llm(mode)?.extract(text, mode).await,
        }
    }

    fn name(&self) -> &str {
        "router"
    }
}
