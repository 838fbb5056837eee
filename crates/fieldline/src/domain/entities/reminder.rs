//! Reminder - a scheduled nudge tied to a task

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::truncate_chars;
use crate::domain::value_objects::{DeliveryChannel, ReminderStatus};

pub const REMINDER_TITLE_MAX_CHARS: usize = 500;

/// Persisted reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    pub fire_at: DateTime<Utc>,
    pub owner_id: Uuid,
    pub related_task_id: Option<Uuid>,
    pub related_site_id: Option<Uuid>,
    pub status: ReminderStatus,
    pub channels: Vec<DeliveryChannel>,
    pub created_at: DateTime<Utc>,
}

/// Reminder fields supplied at creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReminder {
    pub title: String,
    pub fire_at: DateTime<Utc>,
    pub owner_id: Uuid,
    pub related_task_id: Option<Uuid>,
    pub related_site_id: Option<Uuid>,
    pub status: ReminderStatus,
    pub channels: Vec<DeliveryChannel>,
}

impl NewReminder {
    /// Scheduled reminder delivered over Telegram
    pub fn scheduled(title: impl Into<String>, fire_at: DateTime<Utc>, owner_id: Uuid) -> Self {
        Self {
            title: truncate_chars(&title.into(), REMINDER_TITLE_MAX_CHARS),
            fire_at,
            owner_id,
            related_task_id: None,
            related_site_id: None,
            status: ReminderStatus::Scheduled,
            channels: vec![DeliveryChannel::Telegram],
        }
    }

    pub fn for_task(mut self, task_id: Uuid) -> Self {
        self.related_task_id = Some(task_id);
        self
    }

    pub fn at_site(mut self, site_id: Option<Uuid>) -> Self {
        self.related_site_id = site_id;
        self
    }
}
