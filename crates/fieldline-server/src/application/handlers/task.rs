//! Task and reminder creation

use fieldline::{
    ActionTaken, CallerContext, DomainError, Intent, NewReminder, NewTask, RecordStore,
    ResponseEnvelope, StructuredExtractor,
};
use std::sync::Arc;

const PARSE_FAILURE: &str = "I couldn't parse that task request. Please try rephrasing it.";
const STORE_FAILURE: &str = "Sorry, I couldn't create that task right now. Please try again.";

/// Handles `create_task` and `create_reminder`.
///
/// Reminder creation is task creation plus a reminder record when the
/// extraction produced a concrete due datetime.
pub struct TaskHandler {
    store: RecordStore,
    extractor: Arc<dyn StructuredExtractor>,
}

impl TaskHandler {
    pub fn new(store: RecordStore, extractor: Arc<dyn StructuredExtractor>) -> Self {
        Self { store, extractor }
    }

    pub async fn handle(
        &self,
        text: &str,
        caller: &CallerContext,
        intent: Intent,
    ) -> Result<ResponseEnvelope, DomainError> {
        let extracted = match self.extractor.extract_task(text).await {
            Ok(extracted) => extracted,
            Err(e) => {
                tracing::warn!(caller_id = %caller.caller_id, error = %e, "Task extraction failed");
                return Ok(ResponseEnvelope::failure(intent, PARSE_FAILURE));
            }
        };

        let new_task = NewTask::new(&extracted.title, caller.caller_id)
            .with_description(
                extracted
                    .description
                    .clone()
                    .or_else(|| Some(text.to_string())),
            )
            .with_site(caller.primary_site_id)
            .with_due_date(extracted.effective_due_date())
            .with_priority(extracted.mapped_priority())
            .with_external_sync_id(extracted.external_id.clone());

        let task = match self.store.tasks.insert(&new_task).await {
            Ok(task) => task,
            Err(e) => {
                tracing::error!(
                    caller_id = %caller.caller_id,
                    intent = %intent,
                    display_id = %new_task.display_id,
                    error = %e,
                    "Failed to store task"
                );
                // The external service already holds a copy; say so
                return Ok(match &extracted.external_id {
                    Some(external_id) => ResponseEnvelope::failure(
                        intent,
                        "Your task was added to the task service, but I couldn't save it here. Please try again.",
                    )
                    .with_meta("external_sync_id", external_id.as_str()),
                    None => ResponseEnvelope::failure(intent, STORE_FAILURE),
                });
            }
        };

        tracing::info!(
            caller_id = %caller.caller_id,
            display_id = %task.display_id,
            "Created task"
        );

        let mut response = format!("✅ Created task: {}", task.title);
        if let Some(due) = task.due_date {
            response.push_str(&format!("\nDue: {}", due.format("%Y-%m-%d")));
        }

        let mut envelope = ResponseEnvelope::success(intent, "")
            .with_action(ActionTaken::TaskCreated)
            .with_meta("task_id", task.id.to_string())
            .with_meta("display_id", task.display_id.as_str());

        if intent == Intent::CreateReminder {
            match extracted.due_datetime {
                Some(fire_at) => {
                    let reminder = NewReminder::scheduled(&task.title, fire_at, caller.caller_id)
                        .for_task(task.id)
                        .at_site(caller.primary_site_id);

                    match self.store.reminders.insert(&reminder).await {
                        Ok(reminder) => {
                            envelope = envelope
                                .with_meta("reminder_created", true)
                                .with_meta("reminder_id", reminder.id.to_string());
                        }
                        Err(e) => {
                            tracing::error!(
                                caller_id = %caller.caller_id,
                                display_id = %task.display_id,
                                error = %e,
                                "Failed to store reminder"
                            );
                            response.push_str("\nI couldn't schedule the reminder, though.");
                            envelope = envelope.with_meta("reminder_created", false);
                        }
                    }
                }
                None => {
                    tracing::debug!(display_id = %task.display_id, "No concrete time, skipping reminder");
                    envelope = envelope.with_meta("reminder_created", false);
                }
            }
        }

        envelope.response = response;
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{caller, InMemoryStore, ScriptedExtractor};
    use chrono::{NaiveDate, TimeZone, Utc};
    use fieldline::{
        DeliveryChannel, Priority, ReminderStatus, TaskExtraction, TaskStatus,
    };
    use tracing_test::traced_test;
    use uuid::Uuid;

    fn call_anthony() -> TaskExtraction {
        TaskExtraction {
            title: "Call Anthony".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 10),
            priority: Some(3),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_creates_task_with_mapped_priority() {
        let store = InMemoryStore::new();
        let extractor = Arc::new(ScriptedExtractor::new().with_task(call_anthony()));
        let handler = TaskHandler::new(store.record_store(), extractor);
        let site = Uuid::new_v4();
        let caller = caller(Some(site));

        let envelope = handler
            .handle("call Anthony on March 10", &caller, Intent::CreateTask)
            .await
            .unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.action_taken, Some(ActionTaken::TaskCreated));
        assert_eq!(envelope.response, "✅ Created task: Call Anthony\nDue: 2025-03-10");

        let tasks = store.tasks.lock().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].due_date, NaiveDate::from_ymd_opt(2025, 3, 10));
        assert_eq!(tasks[0].assignee_id, caller.caller_id);
        assert_eq!(tasks[0].site_id, Some(site));
        assert_eq!(tasks[0].status, TaskStatus::ToDo);
        assert!(tasks[0].display_id.starts_with("TASK-"));
    }

    #[tokio::test]
    async fn test_extraction_failure_touches_nothing() {
        let store = InMemoryStore::new();
        let handler = TaskHandler::new(store.record_store(), Arc::new(ScriptedExtractor::new()));

        let envelope = handler
            .handle("blah", &caller(None), Intent::CreateTask)
            .await
            .unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.response, PARSE_FAILURE);
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_reminder_created_for_concrete_datetime() {
        let store = InMemoryStore::new();
        let fire_at = Utc.with_ymd_and_hms(2025, 3, 11, 14, 0, 0).unwrap();
        let extractor = Arc::new(ScriptedExtractor::new().with_task(TaskExtraction {
            title: "Call Anthony".into(),
            due_datetime: Some(fire_at),
            ..Default::default()
        }));
        let handler = TaskHandler::new(store.record_store(), extractor);
        let site = Uuid::new_v4();
        let caller = caller(Some(site));

        let envelope = handler
            .handle("remind me to call Anthony tomorrow at 2pm", &caller, Intent::CreateReminder)
            .await
            .unwrap();

        assert!(envelope.success);
        assert!(envelope.response.contains("Due:"));
        assert_eq!(envelope.metadata["reminder_created"], true);

        let task_id = store.tasks.lock().unwrap()[0].id;
        let reminders = store.reminders.lock().unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].fire_at, fire_at);
        assert_eq!(reminders[0].related_task_id, Some(task_id));
        assert_eq!(reminders[0].related_site_id, Some(site));
        assert_eq!(reminders[0].status, ReminderStatus::Scheduled);
        assert_eq!(reminders[0].channels, vec![DeliveryChannel::Telegram]);
    }

    #[tokio::test]
    async fn test_reminder_without_time_is_skipped_silently() {
        let store = InMemoryStore::new();
        let extractor = Arc::new(ScriptedExtractor::new().with_task(call_anthony()));
        let handler = TaskHandler::new(store.record_store(), extractor);

        let envelope = handler
            .handle("remind me to call Anthony", &caller(None), Intent::CreateReminder)
            .await
            .unwrap();

        assert!(envelope.success);
        assert!(store.reminders.lock().unwrap().is_empty());
        assert_eq!(envelope.metadata["reminder_created"], false);
    }

    #[tokio::test]
    async fn test_plain_task_never_creates_reminder() {
        let store = InMemoryStore::new();
        let extractor = Arc::new(ScriptedExtractor::new().with_task(TaskExtraction {
            title: "Call Anthony".into(),
            due_datetime: Some(Utc::now()),
            ..Default::default()
        }));
        let handler = TaskHandler::new(store.record_store(), extractor);

        handler
            .handle("call Anthony at 2pm", &caller(None), Intent::CreateTask)
            .await
            .unwrap();

        assert!(store.reminders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_store_failure_is_logged_once_and_creates_no_reminder() {
        let store = InMemoryStore::new();
        store.fail_task_insert();
        let extractor = Arc::new(ScriptedExtractor::new().with_task(TaskExtraction {
            title: "Call Anthony".into(),
            due_datetime: Some(Utc::now()),
            ..Default::default()
        }));
        let handler = TaskHandler::new(store.record_store(), extractor);

        let envelope = handler
            .handle("remind me to call Anthony at 2pm", &caller(None), Intent::CreateReminder)
            .await
            .unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.response, STORE_FAILURE);
        assert!(store.reminders.lock().unwrap().is_empty());
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("Failed to store task"))
                .count()
            {
                1 => Ok(()),
                n => Err(format!("expected one error line, got {}", n)),
            }
        });
    }

    #[tokio::test]
    async fn test_store_failure_after_external_create_reports_partial_state() {
        let store = InMemoryStore::new();
        store.fail_task_insert();
        let extractor = Arc::new(ScriptedExtractor::new().with_task(TaskExtraction {
            title: "Call Anthony".into(),
            external_id: Some("8812".into()),
            ..Default::default()
        }));
        let handler = TaskHandler::new(store.record_store(), extractor);

        let envelope = handler
            .handle("call Anthony", &caller(None), Intent::CreateTask)
            .await
            .unwrap();

        assert!(!envelope.success);
        assert!(envelope.response.contains("task service"));
        assert_eq!(envelope.metadata["external_sync_id"], "8812");
    }

    #[tokio::test]
    async fn test_reminder_failure_keeps_task_success() {
        let store = InMemoryStore::new();
        store.fail_reminder_insert();
        let extractor = Arc::new(ScriptedExtractor::new().with_task(TaskExtraction {
            title: "Call Anthony".into(),
            due_datetime: Some(Utc::now()),
            ..Default::default()
        }));
        let handler = TaskHandler::new(store.record_store(), extractor);

        let envelope = handler
            .handle("remind me to call Anthony at 2pm", &caller(None), Intent::CreateReminder)
            .await
            .unwrap();

        assert!(envelope.success);
        assert_eq!(store.tasks.lock().unwrap().len(), 1);
        assert_eq!(envelope.metadata["reminder_created"], false);
    }
}
