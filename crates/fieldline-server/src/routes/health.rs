//! Health Routes

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use super::ApiError;
use crate::AppState;

/// Record store connectivity
#[derive(Debug, Serialize, ToSchema)]
pub struct DatabaseHealth {
    pub status: String,
    pub database: String,
}

/// Check that the record store answers a trivial query
#[utoipa::path(
    get,
    path = "/api/health/database",
    responses(
        (status = 200, description = "Database reachable", body = DatabaseHealth),
        (status = 503, description = "Database unreachable")
    ),
    tag = "Health"
)]
pub async fn database_health(
    State(state): State<AppState>,
) -> Result<Json<DatabaseHealth>, ApiError> {
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Database unreachable".to_string(),
            )
        })?;

    Ok(Json(DatabaseHealth {
        status: "ok".to_string(),
        database: "connected".to_string(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health/database", get(database_health))
}
