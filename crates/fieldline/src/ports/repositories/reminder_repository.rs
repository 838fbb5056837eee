//! Reminder Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, NewReminder, Reminder};

/// Repository interface for Reminder entities
#[async_trait]
pub trait ReminderRepository: Send + Sync {
    async fn insert(&self, reminder: &NewReminder) -> Result<Reminder, DomainError>;

    /// Reminders linked to a task
    async fn find_for_task(&self, task_id: Uuid) -> Result<Vec<Reminder>, DomainError>;
}
