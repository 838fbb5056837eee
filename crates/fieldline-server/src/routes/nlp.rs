//! NLP Routes - Free-text routing

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use super::ApiError;
use crate::models::{ProcessRequest, ProcessResponse};
use crate::AppState;

/// Classify free text and run the matching handler
#[utoipa::path(
    post,
    path = "/api/nlp/process",
    request_body = ProcessRequest,
    responses(
        (status = 200, description = "Router answer (success may be false)", body = ProcessResponse),
        (status = 400, description = "Empty or over-long text"),
        (status = 401, description = "Missing or invalid API key")
    ),
    tag = "NLP"
)]
pub async fn process(
    State(state): State<AppState>,
    Json(payload): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    // Validated on the trimmed text, routed untouched
    let text = payload.text.as_str();
    if text.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Text is required".to_string()));
    }
    if text.chars().count() > state.max_message_length {
        return Err((
            StatusCode::BAD_REQUEST,
            format!(
                "Text must be at most {} characters",
                state.max_message_length
            ),
        ));
    }

    let caller = payload.user_context.into_caller(state.default_site_id);
    let envelope = state.orchestrator.process(text, &caller).await;

    Ok(Json(envelope.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/nlp/process", post(process))
}
