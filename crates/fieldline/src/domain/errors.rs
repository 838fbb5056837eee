//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    #[error("Sync mirror failed: {0}")]
    SyncMirror(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("{service} timed out after {after_ms}ms")]
    Timeout { service: String, after_ms: u64 },
}

/// Coarse failure classes used when deciding how to answer the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input was malformed or incomplete
    Validation,
    /// The extraction service was unavailable or returned unusable output
    Extraction,
    /// The record store rejected a write or could not be reached
    Persistence,
    /// Best-effort external mirroring failed
    SyncMirror,
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: Uuid) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn not_found_str<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn timeout<T: AsRef<str>>(service: T, after: std::time::Duration) -> Self {
        Self::Timeout {
            service: service.as_ref().to_string(),
            after_ms: after.as_millis() as u64,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::NotFound { .. } => ErrorKind::Validation,
            Self::Extraction(_) | Self::ExternalService(_) | Self::Timeout { .. } => {
                ErrorKind::Extraction
            }
            Self::Repository(_) | Self::Unavailable(_) => ErrorKind::Persistence,
            Self::SyncMirror(_) => ErrorKind::SyncMirror,
        }
    }

    /// Transient failures worth retrying later
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout { .. })
    }
}
