//! Task Sync Port
//!
//! External task service that parses natural-language tasks and keeps a
//! mirrored copy whose completion we propagate.

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::TaskExtraction;

/// External task service interface
#[async_trait]
pub trait TaskSyncService: Send + Sync {
    /// Create a task from free text; the result carries `external_id`
    async fn create_from_text(&self, text: &str) -> Result<TaskExtraction, DomainError>;

    /// Close the mirrored task. `Ok(false)` means the service refused.
    async fn complete(&self, external_id: &str) -> Result<bool, DomainError>;

    fn name(&self) -> &str;
}
