//! FieldReport - a technician's narrative from a site

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::truncate_chars;
use crate::domain::value_objects::{DisplayIdPrefix, ReportStatus, ReportType};

pub const REPORT_TITLE_MAX_CHARS: usize = 255;

/// Persisted field report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldReport {
    pub id: Uuid,
    pub display_id: String,
    pub site_id: Option<Uuid>,
    pub report_date: NaiveDate,
    pub submitter_id: Uuid,
    pub report_type: ReportType,
    pub title_summary: String,
    /// Verbatim source text. Never rewritten.
    pub full_content: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Field report fields supplied at creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFieldReport {
    pub display_id: String,
    pub site_id: Option<Uuid>,
    pub report_date: NaiveDate,
    pub submitter_id: Uuid,
    pub report_type: ReportType,
    pub title_summary: String,
    pub full_content: String,
    pub status: ReportStatus,
}

impl NewFieldReport {
    /// `full_content` is taken as-is from the caller's text
    pub fn new(submitter_id: Uuid, full_content: impl Into<String>) -> Self {
        let report_date = Utc::now().date_naive();
        Self {
            display_id: DisplayIdPrefix::FieldReport.generate(),
            site_id: None,
            report_date,
            submitter_id,
            report_type: ReportType::default(),
            title_summary: default_report_title(report_date),
            full_content: full_content.into(),
            status: ReportStatus::Submitted,
        }
    }

    pub fn with_site(mut self, site_id: Option<Uuid>) -> Self {
        self.site_id = site_id;
        self
    }

    pub fn with_type(mut self, report_type: ReportType) -> Self {
        self.report_type = report_type;
        self
    }

    /// Blank titles keep the dated default
    pub fn with_title(mut self, title: Option<String>) -> Self {
        if let Some(title) = title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
            self.title_summary = truncate_chars(&title, REPORT_TITLE_MAX_CHARS);
        }
        self
    }
}

/// "Field Report - YYYY-MM-DD"
pub fn default_report_title(date: NaiveDate) -> String {
    format!("Field Report - {}", date.format("%Y-%m-%d"))
}
