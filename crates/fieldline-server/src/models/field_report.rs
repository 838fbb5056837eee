//! Field report DTOs

use chrono::{DateTime, NaiveDate, Utc};
use fieldline::FieldReport;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Create field report request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFieldReportRequest {
    pub submitter_id: Uuid,
    pub site_id: Option<Uuid>,
    /// Stored verbatim
    pub content: String,
    /// One of the report type labels (default: Daily Operational Summary)
    pub report_type: Option<String>,
    pub title: Option<String>,
}

/// Query parameters for listing a site's reports
#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportListQuery {
    /// Maximum reports returned (default: 50)
    pub limit: Option<usize>,
}

/// Field report response
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldReportResponse {
    pub id: Uuid,
    pub display_id: String,
    pub site_id: Option<Uuid>,
    pub report_date: NaiveDate,
    pub submitter_id: Uuid,
    pub report_type: String,
    pub title: String,
    pub content: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<FieldReport> for FieldReportResponse {
    fn from(report: FieldReport) -> Self {
        Self {
            id: report.id,
            display_id: report.display_id,
            site_id: report.site_id,
            report_date: report.report_date,
            submitter_id: report.submitter_id,
            report_type: report.report_type.as_str().to_string(),
            title: report.title_summary,
            content: report.full_content,
            status: report.status.to_string(),
            created_at: report.created_at,
        }
    }
}
