//! Task DTOs

use chrono::{DateTime, NaiveDate, Utc};
use fieldline::Task;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Create task request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Uuid,
    /// Defaults to the assignee
    pub creator_id: Option<Uuid>,
    pub site_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    /// High, Medium or Low (default: Medium)
    pub priority: Option<String>,
}

/// Query parameters for listing a user's tasks
#[derive(Debug, Deserialize, IntoParams)]
pub struct TaskListQuery {
    /// To Do, In Progress or Completed
    pub status: Option<String>,
    /// Maximum tasks returned (default: 50)
    pub limit: Option<usize>,
}

/// Task response
#[derive(Debug, Serialize, ToSchema)]
pub struct TaskResponse {
    pub id: Uuid,
    pub display_id: String,
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Uuid,
    pub creator_id: Uuid,
    pub site_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub priority: String,
    pub status: String,
    pub external_sync_id: Option<String>,
    pub completion_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            display_id: task.display_id,
            title: task.title,
            description: task.detailed_description,
            assignee_id: task.assignee_id,
            creator_id: task.creator_id,
            site_id: task.site_id,
            due_date: task.due_date,
            priority: task.priority.as_str().to_string(),
            status: task.status.as_str().to_string(),
            external_sync_id: task.external_sync_id,
            completion_date: task.completion_date,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Completed task plus the external mirror outcome, when one was attempted
#[derive(Debug, Serialize, ToSchema)]
pub struct CompleteTaskResponse {
    pub task: TaskResponse,
    /// completed, refused or failed
    pub external_sync: Option<String>,
}
