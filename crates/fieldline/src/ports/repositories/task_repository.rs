//! Task Repository Port
//!
//! Abstract interface for Task persistence operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, NewTask, Task, TaskStatus, TaskStatusChange};

/// Filter for listing a user's tasks
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    pub limit: Option<usize>,
}

/// Repository interface for Task entities
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task and return the stored record
    async fn insert(&self, task: &NewTask) -> Result<Task, DomainError>;

    /// Find a task by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, DomainError>;

    /// Tasks assigned to a user, newest first
    async fn find_for_assignee(
        &self,
        assignee_id: Uuid,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, DomainError>;

    /// Apply a status change; `None` when the task does not exist
    async fn update_status(
        &self,
        id: Uuid,
        change: TaskStatusChange,
    ) -> Result<Option<Task>, DomainError>;
}
