//! Task status updates

use std::sync::Arc;

use fieldline::domain::services::{parse_status_update, RequestedStatus};
use fieldline::{
    ActionTaken, CallerContext, DomainError, Intent, RecordStore, ResponseEnvelope, TaskQuery,
    TaskStatus, TaskStatusChange, TaskSyncService,
};

const NO_REFERENCE: &str =
    "Please specify which task you want to update. You can use the task ID or title.";
const UPDATE_FAILURE: &str = "Sorry, I couldn't update the task status. Please try again.";

/// Result of mirroring a completion to the task-sync service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorOutcome {
    Completed,
    Refused,
    Failed,
}

impl MirrorOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            MirrorOutcome::Completed => "completed",
            MirrorOutcome::Refused => "refused",
            MirrorOutcome::Failed => "failed",
        }
    }
}

/// Best-effort external completion. Never fails the caller.
pub async fn mirror_completion(sync: &dyn TaskSyncService, external_id: &str) -> MirrorOutcome {
    match sync.complete(external_id).await {
        Ok(true) => MirrorOutcome::Completed,
        Ok(false) => {
            tracing::warn!(external_id = %external_id, service = %sync.name(), "Completion mirror refused");
            MirrorOutcome::Refused
        }
        Err(e) => {
            tracing::warn!(
                external_id = %external_id,
                service = %sync.name(),
                error = %e,
                "Completion mirror failed"
            );
            MirrorOutcome::Failed
        }
    }
}

pub struct StatusUpdateHandler {
    store: RecordStore,
    task_sync: Option<Arc<dyn TaskSyncService>>,
}

impl StatusUpdateHandler {
    pub fn new(store: RecordStore, task_sync: Option<Arc<dyn TaskSyncService>>) -> Self {
        Self { store, task_sync }
    }

    pub async fn handle(
        &self,
        text: &str,
        caller: &CallerContext,
    ) -> Result<ResponseEnvelope, DomainError> {
        let intent = Intent::UpdateTaskStatus;

        let Some(request) = parse_status_update(text) else {
            return Ok(ResponseEnvelope::failure(intent, NO_REFERENCE));
        };

        let status = match request.target {
            RequestedStatus::Known(status) => status,
            RequestedStatus::Unrecognized(word) => {
                return Ok(ResponseEnvelope::failure(
                    intent,
                    format!(
                        "I don't recognize the status '{}'. Use To Do, In Progress or Completed.",
                        word
                    ),
                ));
            }
        };

        let tasks = match self
            .store
            .tasks
            .find_for_assignee(caller.caller_id, &TaskQuery::default())
            .await
        {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::error!(caller_id = %caller.caller_id, error = %e, "Failed to load tasks");
                return Ok(ResponseEnvelope::failure(intent, UPDATE_FAILURE));
            }
        };

        let Some(task) = tasks
            .into_iter()
            .find(|t| t.matches_reference(&request.reference))
        else {
            return Ok(ResponseEnvelope::failure(
                intent,
                format!(
                    "I couldn't find a task matching '{}'. Please check the task ID or title.",
                    request.reference
                ),
            ));
        };

        let updated = match self
            .store
            .tasks
            .update_status(task.id, TaskStatusChange::to(status))
            .await
        {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                tracing::warn!(task_id = %task.id, "Task disappeared before update");
                return Ok(ResponseEnvelope::failure(intent, UPDATE_FAILURE));
            }
            Err(e) => {
                tracing::error!(
                    caller_id = %caller.caller_id,
                    display_id = %task.display_id,
                    error = %e,
                    "Failed to update task status"
                );
                return Ok(ResponseEnvelope::failure(intent, UPDATE_FAILURE));
            }
        };

        let glyph = if status == TaskStatus::Completed { "✅" } else { "🔄" };
        let mut envelope = ResponseEnvelope::success(
            intent,
            format!(
                "{} Task updated: {}\nStatus: {}",
                glyph, updated.title, updated.status
            ),
        )
        .with_action(ActionTaken::TaskStatusUpdated)
        .with_meta("task_id", updated.id.to_string())
        .with_meta("new_status", updated.status.as_str());

        if status == TaskStatus::Completed {
            if let (Some(external_id), Some(sync)) = (&updated.external_sync_id, &self.task_sync) {
                let outcome = mirror_completion(sync.as_ref(), external_id).await;
                envelope = envelope.with_meta("external_sync", outcome.as_str());
            }
        }

        Ok(envelope)
    }
}
