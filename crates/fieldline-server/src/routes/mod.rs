//! Fieldline API Routes
//!
//! - /api/nlp/process - Free-text routing through the orchestrator
//! - /api/tasks - Structured task management
//! - /api/field-reports - Field report logging
//! - /api/sites - Site lookup and SOP documents
//! - /api/health/database - Record store connectivity
//! - /telegram/webhook - Chat transport (secret header, no API key)

pub mod field_reports;
pub mod health;
pub mod nlp;
pub mod sites;
pub mod swagger;
pub mod tasks;
pub mod telegram;

use axum::http::StatusCode;
use fieldline::DomainError;

/// Error half of every route result
pub type ApiError = (StatusCode, String);

/// Map a domain error onto an HTTP status; server-side failures are logged
pub fn api_error(e: DomainError) -> ApiError {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Timeout { .. } | DomainError::Unavailable(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(error = %e, "Request failed");
    }

    (status, e.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{body::Body, http::Request, Router};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::application::testing::{InMemoryStore, ScriptedExtractor};
    use crate::application::{
        IntentClassifier, Orchestrator, ReportService, SiteService, TaskService,
    };
    use crate::AppState;

    pub fn state(store: &Arc<InMemoryStore>) -> AppState {
        let records = store.record_store();
        let orchestrator = Orchestrator::new(
            IntentClassifier::offline(),
            records.clone(),
            Arc::new(ScriptedExtractor::new()),
            None,
        );

        AppState {
            pool: PgPoolOptions::new()
                .connect_lazy("postgres://localhost/fieldline_test")
                .unwrap(),
            orchestrator: Arc::new(orchestrator),
            task_service: Arc::new(TaskService::new(records.clone(), None)),
            report_service: Arc::new(ReportService::new(records.clone())),
            site_service: Arc::new(SiteService::new(records, None)),
            telegram: None,
            default_site_id: None,
            max_message_length: 2000,
        }
    }

    /// Send a request and decode the body as JSON (`Null` when not JSON)
    pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let status = |e| api_error(e).0;

        assert_eq!(
            status(DomainError::not_found("Task", uuid::Uuid::nil())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status(DomainError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(DomainError::Unavailable("x".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status(DomainError::timeout("openai", std::time::Duration::from_secs(15))),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status(DomainError::Repository("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
