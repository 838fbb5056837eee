//! Field Report Routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use fieldline::{NewFieldReport, ReportType};

use super::{api_error, ApiError};
use crate::models::{CreateFieldReportRequest, FieldReportResponse, ReportListQuery};
use crate::AppState;

/// Log a field report from structured fields
#[utoipa::path(
    post,
    path = "/api/field-reports",
    request_body = CreateFieldReportRequest,
    responses(
        (status = 201, description = "Field report logged", body = FieldReportResponse),
        (status = 400, description = "Empty content or unknown report type"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Field Reports"
)]
pub async fn create_field_report(
    State(state): State<AppState>,
    Json(payload): Json<CreateFieldReportRequest>,
) -> Result<(StatusCode, Json<FieldReportResponse>), ApiError> {
    let report_type = payload
        .report_type
        .as_deref()
        .map(str::parse::<ReportType>)
        .transpose()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?
        .unwrap_or_default();

    let report = NewFieldReport::new(payload.submitter_id, payload.content)
        .with_site(payload.site_id)
        .with_type(report_type)
        .with_title(payload.title);

    let saved = state.report_service.create(report).await.map_err(api_error)?;

    Ok((StatusCode::CREATED, Json(saved.into())))
}

/// Recent field reports for a site
#[utoipa::path(
    get,
    path = "/api/field-reports/site/{site_id}",
    params(
        ("site_id" = Uuid, Path, description = "Site ID"),
        ReportListQuery
    ),
    responses(
        (status = 200, description = "Reports, newest first", body = Vec<FieldReportResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Field Reports"
)]
pub async fn list_site_reports(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
    Query(query): Query<ReportListQuery>,
) -> Result<Json<Vec<FieldReportResponse>>, ApiError> {
    let reports = state
        .report_service
        .list_for_site(site_id, query.limit)
        .await
        .map_err(api_error)?;

    Ok(Json(
        reports.into_iter().map(FieldReportResponse::from).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/field-reports", post(create_field_report))
        .route("/api/field-reports/site/:site_id", get(list_site_reports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryStore;
    use crate::routes::test_support::{get as get_request, json_request, send, state};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_keeps_content_verbatim() {
        let store = InMemoryStore::new();
        let site = store.add_site("Alpha", &[]);
        let app = router().with_state(state(&store));
        let content = "Generator at 80% load\n  fuel good ";

        let (status, body) = send(
            app.clone(),
            json_request(
                "POST",
                "/api/field-reports",
                json!({
                    "submitter_id": Uuid::new_v4(),
                    "site_id": site.id,
                    "content": content,
                    "report_type": "Equipment Check"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["content"], content);
        assert_eq!(body["report_type"], "Equipment Check");
        assert_eq!(body["status"], "Submitted");

        let (status, body) = send(
            app,
            get_request(&format!("/api/field-reports/site/{}?limit=5", site.id)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_type_and_empty_content() {
        let store = InMemoryStore::new();
        let app = router().with_state(state(&store));

        let (status, _) = send(
            app.clone(),
            json_request(
                "POST",
                "/api/field-reports",
                json!({ "submitter_id": Uuid::new_v4(), "content": "ok", "report_type": "Weather" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            app,
            json_request(
                "POST",
                "/api/field-reports",
                json!({ "submitter_id": Uuid::new_v4(), "content": "" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(store.writes(), 0);
    }
}
