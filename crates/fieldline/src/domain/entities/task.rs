//! Task - a unit of work assigned to a technician

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::truncate_chars;
use crate::domain::value_objects::{DisplayIdPrefix, Priority, TaskStatus};

pub const TASK_TITLE_MAX_CHARS: usize = 500;

/// Persisted task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub display_id: String,
    pub title: String,
    pub detailed_description: Option<String>,
    pub assignee_id: Uuid,
    pub site_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Id of the mirrored task in the external task service
    pub external_sync_id: Option<String>,
    pub creator_id: Uuid,
    pub completion_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Case-insensitive title substring or exact display id
    pub fn matches_reference(&self, reference: &str) -> bool {
        let reference = reference.trim();
        if reference.is_empty() {
            return false;
        }
        self.display_id == reference
            || self
                .title
                .to_lowercase()
                .contains(&reference.to_lowercase())
    }
}

/// Task fields supplied at creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub display_id: String,
    pub title: String,
    pub detailed_description: Option<String>,
    pub assignee_id: Uuid,
    pub site_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub external_sync_id: Option<String>,
    pub creator_id: Uuid,
}

impl NewTask {
    /// New `To Do` task created and assigned by the same caller.
    /// An over-long title is cut and kept whole as the description.
    pub fn new(title: impl Into<String>, caller_id: Uuid) -> Self {
        let title = title.into();
        let (title, detailed_description) = if title.chars().count() > TASK_TITLE_MAX_CHARS {
            (truncate_chars(&title, TASK_TITLE_MAX_CHARS), Some(title))
        } else {
            (title, None)
        };
        Self {
            display_id: DisplayIdPrefix::Task.generate(),
            title,
            detailed_description,
            assignee_id: caller_id,
            site_id: None,
            due_date: None,
            priority: Priority::default(),
            status: TaskStatus::ToDo,
            external_sync_id: None,
            creator_id: caller_id,
        }
    }

    /// Blank descriptions keep the current one
    pub fn with_description(mut self, description: Option<String>) -> Self {
        if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
            self.detailed_description = Some(description);
        }
        self
    }

    pub fn with_site(mut self, site_id: Option<Uuid>) -> Self {
        self.site_id = site_id;
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_assignee(mut self, assignee_id: Uuid) -> Self {
        self.assignee_id = assignee_id;
        self
    }

    pub fn with_external_sync_id(mut self, external_sync_id: Option<String>) -> Self {
        self.external_sync_id = external_sync_id;
        self
    }
}

/// Status change applied by `TaskRepository::update_status`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskStatusChange {
    pub status: TaskStatus,
    pub completion_date: Option<DateTime<Utc>>,
}

impl TaskStatusChange {
    /// Completion timestamp is set only when moving to `Completed`
    pub fn to(status: TaskStatus) -> Self {
        let completion_date = match status {
            TaskStatus::Completed => Some(Utc::now()),
            _ => None,
        };
        Self {
            status,
            completion_date,
        }
    }
}
