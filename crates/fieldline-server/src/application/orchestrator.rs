//! Orchestrator: classify, dispatch, always answer
//!
//! `process` never fails. Handler errors and panics become the generic
//! retry envelope, logged server-side with the caller and intent.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use fieldline::{
    CallerContext, DomainError, Intent, RecordStore, ResponseEnvelope, StructuredExtractor,
    TaskSyncService,
};

use super::classifier::IntentClassifier;
use super::handlers::{
    FieldReportHandler, ListItemHandler, QueryHandler, StatusUpdateHandler, TaskHandler,
    GENERAL_HELP, GENERIC_ERROR, UNKNOWN_INTENT_HELP,
};

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.7;

pub struct Orchestrator {
    classifier: IntentClassifier,
    tasks: TaskHandler,
    field_reports: FieldReportHandler,
    list_items: ListItemHandler,
    queries: QueryHandler,
    status_updates: StatusUpdateHandler,
    confidence_threshold: f32,
}

impl Orchestrator {
    pub fn new(
        classifier: IntentClassifier,
        store: RecordStore,
        extractor: Arc<dyn StructuredExtractor>,
        task_sync: Option<Arc<dyn TaskSyncService>>,
    ) -> Self {
        Self {
            classifier,
            tasks: TaskHandler::new(store.clone(), extractor.clone()),
            field_reports: FieldReportHandler::new(store.clone(), extractor),
            list_items: ListItemHandler::new(store.clone()),
            queries: QueryHandler::new(store.clone()),
            status_updates: StatusUpdateHandler::new(store, task_sync),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    /// Confidence below this is flagged in metadata; routing ignores it
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub async fn process(&self, text: &str, caller: &CallerContext) -> ResponseEnvelope {
        let classification = match AssertUnwindSafe(self.classifier.classify(text))
            .catch_unwind()
            .await
        {
            Ok(classification) => classification,
            Err(_) => {
                tracing::error!(caller_id = %caller.caller_id, "Classifier panicked");
                return ResponseEnvelope::failure(Intent::Unknown, GENERIC_ERROR);
            }
        };
        let intent = classification.intent;

        tracing::debug!(
            caller_id = %caller.caller_id,
            intent = %intent,
            confidence = classification.confidence,
            "Classified message"
        );

        let envelope = match AssertUnwindSafe(self.dispatch(intent, text, caller))
            .catch_unwind()
            .await
        {
            Ok(Ok(envelope)) => envelope,
            Ok(Err(e)) => {
                tracing::error!(
                    caller_id = %caller.caller_id,
                    intent = %intent,
                    error = %e,
                    "Handler failed"
                );
                ResponseEnvelope::failure(intent, GENERIC_ERROR)
            }
            Err(_) => {
                tracing::error!(
                    caller_id = %caller.caller_id,
                    intent = %intent,
                    "Handler panicked"
                );
                ResponseEnvelope::failure(intent, GENERIC_ERROR)
            }
        };

        let envelope = envelope.with_confidence(classification.confidence);
        if classification.confidence < self.confidence_threshold {
            envelope.with_meta("below_threshold", true)
        } else {
            envelope
        }
    }

    async fn dispatch(
        &self,
        intent: Intent,
        text: &str,
        caller: &CallerContext,
    ) -> Result<ResponseEnvelope, DomainError> {
        match intent {
            Intent::CreateTask | Intent::CreateReminder => {
                self.tasks.handle(text, caller, intent).await
            }
            Intent::CreateFieldReport => self.field_reports.handle(text, caller).await,
            Intent::AddListItem => self.list_items.handle(text, caller).await,
            Intent::QueryTasks => self.queries.tasks(caller).await,
            Intent::QueryLists => self.queries.lists(text, caller).await,
            Intent::QueryReports => self.queries.reports(caller).await,
            Intent::UpdateTaskStatus => self.status_updates.handle(text, caller).await,
            Intent::GeneralQuery => Ok(ResponseEnvelope::success(intent, GENERAL_HELP)),
            Intent::Unknown => Ok(ResponseEnvelope::failure(intent, UNKNOWN_INTENT_HELP)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{caller, InMemoryStore, ScriptedExtractor};
    use chrono::{TimeZone, Utc};
    use fieldline::{ActionTaken, Classification, TaskExtraction};
    use tracing_test::traced_test;

    fn offline(store: &Arc<InMemoryStore>, extractor: ScriptedExtractor) -> Orchestrator {
        Orchestrator::new(
            IntentClassifier::offline(),
            store.record_store(),
            Arc::new(extractor),
            None,
        )
    }

    #[tokio::test]
    async fn test_unknown_input_gets_help_and_no_writes() {
        let store = InMemoryStore::new();
        let orchestrator = offline(&store, ScriptedExtractor::new());

        let envelope = orchestrator.process("asdkjhasd", &caller(None)).await;

        assert!(!envelope.success);
        assert_eq!(envelope.intent, Intent::Unknown);
        assert!(envelope.response.contains("/help"));
        assert_eq!(envelope.confidence, Some(0.1));
        assert_eq!(envelope.metadata["below_threshold"], true);
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_reminder_scenario() {
        let store = InMemoryStore::new();
        let fire_at = Utc.with_ymd_and_hms(2025, 3, 11, 14, 0, 0).unwrap();
        let extractor = ScriptedExtractor::new()
            .classifying(Classification::new(Intent::CreateReminder, 0.93))
            .with_task(TaskExtraction {
                title: "Call Anthony".into(),
                due_datetime: Some(fire_at),
                ..Default::default()
            });
        let extractor: Arc<ScriptedExtractor> = Arc::new(extractor);
        let orchestrator = Orchestrator::new(
            IntentClassifier::new(Some(extractor.clone())),
            store.record_store(),
            extractor,
            None,
        );
        let site = store.add_site("Alpha", &[]);

        let envelope = orchestrator
            .process("remind me to call Anthony tomorrow at 2pm", &caller(Some(site.id)))
            .await;

        assert!(envelope.success);
        assert_eq!(envelope.intent, Intent::CreateReminder);
        assert_eq!(envelope.action_taken, Some(ActionTaken::TaskCreated));
        assert!(envelope.response.contains("Due:"));
        assert!(envelope.metadata.get("below_threshold").is_none());
        assert_eq!(store.tasks.lock().unwrap().len(), 1);
        let reminders = store.reminders.lock().unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].fire_at, fire_at);
    }

    #[tokio::test]
    async fn test_general_query() {
        let store = InMemoryStore::new();
        let extractor = Arc::new(
            ScriptedExtractor::new().classifying(Classification::new(Intent::GeneralQuery, 0.8)),
        );
        let orchestrator = Orchestrator::new(
            IntentClassifier::new(Some(extractor.clone())),
            store.record_store(),
            extractor,
            None,
        );

        let envelope = orchestrator.process("how is site alpha", &caller(None)).await;

        assert!(envelope.success);
        assert_eq!(envelope.response, GENERAL_HELP);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_handler_panic_becomes_generic_error() {
        let store = InMemoryStore::new();
        store.panic_on_task_reads();
        let orchestrator = offline(&store, ScriptedExtractor::new());

        let envelope = orchestrator.process("show my tasks", &caller(None)).await;

        assert!(!envelope.success);
        assert_eq!(envelope.intent, Intent::QueryTasks);
        assert_eq!(envelope.response, GENERIC_ERROR);
        assert!(logs_contain("Handler panicked"));
    }

    #[tokio::test]
    async fn test_field_report_routed_offline() {
        let store = InMemoryStore::new();
        let orchestrator = offline(&store, ScriptedExtractor::new());
        let text = "Site Alpha: noticed oil leak near generator 2";

        let envelope = orchestrator.process(text, &caller(None)).await;

        assert!(envelope.success);
        assert_eq!(envelope.intent, Intent::CreateFieldReport);
        assert_eq!(store.field_reports.lock().unwrap()[0].full_content, text);
    }

    #[tokio::test]
    async fn test_threshold_is_informational() {
        let store = InMemoryStore::new();
        let extractor = Arc::new(
            ScriptedExtractor::new().classifying(Classification::new(Intent::QueryReports, 0.3)),
        );
        let orchestrator = Orchestrator::new(
            IntentClassifier::new(Some(extractor.clone())),
            store.record_store(),
            extractor,
            None,
        )
        .with_confidence_threshold(0.7);

        let envelope = orchestrator.process("reports?", &caller(None)).await;

        assert!(envelope.success);
        assert_eq!(envelope.intent, Intent::QueryReports);
        assert_eq!(envelope.metadata["below_threshold"], true);
    }
}
