//! Task Application Service (Use Case)
//!
//! Structured task operations behind the HTTP API.

use std::sync::Arc;

use uuid::Uuid;

use fieldline::{
    DomainError, NewTask, RecordStore, Task, TaskQuery, TaskStatus, TaskStatusChange,
    TaskSyncService,
};

use super::handlers::{mirror_completion, MirrorOutcome};

/// Application service for task operations
pub struct TaskService {
    store: RecordStore,
    task_sync: Option<Arc<dyn TaskSyncService>>,
}

impl TaskService {
    pub fn new(store: RecordStore, task_sync: Option<Arc<dyn TaskSyncService>>) -> Self {
        Self { store, task_sync }
    }

    /// Create a task from already-structured fields
    pub async fn create(&self, task: NewTask) -> Result<Task, DomainError> {
        if task.title.trim().is_empty() {
            return Err(DomainError::Validation("Task title is required".to_string()));
        }

        let saved = self.store.tasks.insert(&task).await?;
        tracing::info!(display_id = %saved.display_id, "Created task: {}", saved.title);
        Ok(saved)
    }

    /// Tasks assigned to a user, newest first
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, DomainError> {
        self.store.tasks.find_for_assignee(user_id, query).await
    }

    /// Mark a task completed and mirror the completion when it has an
    /// external id. The mirror outcome is `None` when nothing was mirrored.
    pub async fn complete(&self, id: Uuid) -> Result<(Task, Option<MirrorOutcome>), DomainError> {
        let task = self
            .store
            .tasks
            .update_status(id, TaskStatusChange::to(TaskStatus::Completed))
            .await?
            .ok_or_else(|| DomainError::not_found("Task", id))?;

        tracing::info!(display_id = %task.display_id, "Completed task: {}", task.title);

        let outcome = match (&self.task_sync, &task.external_sync_id) {
            (Some(sync), Some(external_id)) => {
                Some(mirror_completion(sync.as_ref(), external_id).await)
            }
            _ => None,
        };

        Ok((task, outcome))
    }
}
