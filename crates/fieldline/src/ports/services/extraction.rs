//! Structured Extraction Port
//!
//! Best-effort conversion of free text into typed fields, backed by a
//! language model, a remote NLP service, or both.

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{
    Classification, Extraction, ExtractionMode, FieldReportExtraction, TaskExtraction,
};

/// Structured extraction interface
///
/// Implementations return `DomainError::Extraction` (or a timeout /
/// external-service error) when they cannot produce a usable result.
/// Each call returns the `Extraction` variant matching `mode`.
#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    async fn extract(&self, text: &str, mode: ExtractionMode) -> Result<Extraction, DomainError>;

    /// Name used in logs
    fn name(&self) -> &str;

    async fn classify(&self, text: &str) -> Result<Classification, DomainError> {
        match self.extract(text, ExtractionMode::Classification).await? {
            Extraction::Classification(c) => Ok(c),
            other => Err(mode_mismatch(ExtractionMode::Classification, &other)),
        }
    }

    async fn extract_task(&self, text: &str) -> Result<TaskExtraction, DomainError> {
        match self.extract(text, ExtractionMode::Task).await? {
            Extraction::Task(t) => Ok(t),
            other => Err(mode_mismatch(ExtractionMode::Task, &other)),
        }
    }

    async fn extract_field_report(&self, text: &str) -> Result<FieldReportExtraction, DomainError> {
        match self.extract(text, ExtractionMode::FieldReport).await? {
            Extraction::FieldReport(r) => Ok(r),
            other => Err(mode_mismatch(ExtractionMode::FieldReport, &other)),
        }
    }
}

fn mode_mismatch(wanted: ExtractionMode, got: &Extraction) -> DomainError {
    DomainError::Extraction(format!(
        "asked for {} extraction, got {}",
        wanted,
        got.mode()
    ))
}
