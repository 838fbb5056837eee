//! Site Routes - Lookup and SOP documents

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use super::{api_error, ApiError};
use crate::models::{SiteResponse, SiteSearchQuery, SopResponse};
use crate::AppState;

/// List active sites
#[utoipa::path(
    get,
    path = "/api/sites",
    responses(
        (status = 200, description = "Active sites by name", body = Vec<SiteResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sites"
)]
pub async fn list_sites(
    State(state): State<AppState>,
) -> Result<Json<Vec<SiteResponse>>, ApiError> {
    let sites = state.site_service.list_active().await.map_err(api_error)?;
    Ok(Json(sites.into_iter().map(SiteResponse::from).collect()))
}

/// Search sites by name, alias or location
#[utoipa::path(
    get,
    path = "/api/sites/search",
    params(SiteSearchQuery),
    responses(
        (status = 200, description = "Matching sites", body = Vec<SiteResponse>),
        (status = 400, description = "Empty query"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sites"
)]
pub async fn search_sites(
    State(state): State<AppState>,
    Query(query): Query<SiteSearchQuery>,
) -> Result<Json<Vec<SiteResponse>>, ApiError> {
    let sites = state
        .site_service
        .search(&query.q)
        .await
        .map_err(api_error)?;
    Ok(Json(sites.into_iter().map(SiteResponse::from).collect()))
}

/// Create an SOP document for a site
#[utoipa::path(
    post,
    path = "/api/sites/{id}/sop",
    params(
        ("id" = Uuid, Path, description = "Site ID")
    ),
    responses(
        (status = 200, description = "SOP document created", body = SopResponse),
        (status = 404, description = "Site not found"),
        (status = 500, description = "Document storage failed or is not configured"),
        (status = 503, description = "Document storage timed out")
    ),
    tag = "Sites"
)]
pub async fn create_site_sop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SopResponse>, ApiError> {
    let site = state.site_service.create_sop(id).await.map_err(api_error)?;

    Ok(Json(SopResponse {
        site_id: site.id,
        sop_document_link: site.sop_document_link.unwrap_or_default(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sites", get(list_sites))
        .route("/api/sites/search", get(search_sites))
        .route("/api/sites/:id/sop", post(create_site_sop))
}
