//! Keyword heuristics for field reports
//!
//! Used whenever the extraction service cannot produce report metadata.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::entities::default_report_title;
use crate::domain::value_objects::{FieldReportExtraction, ReportType};

/// Checked in order; first set with a hit decides the type
const TYPE_KEYWORDS: &[(ReportType, &[&str])] = &[
    (
        ReportType::IncidentReport,
        &["incident", "problem", "issue", "error", "failure"],
    ),
    (
        ReportType::MaintenanceLog,
        &["maintenance", "service", "repair", "check"],
    ),
    (ReportType::SafetyObservation, &["safety", "hazard", "danger"]),
];

fn site_pattern() -> &'static Regex {
    static SITE: OnceLock<Regex> = OnceLock::new();
    SITE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:site\s+|at\s+site\s+)(\w+)").expect("site pattern is valid")
    })
}

/// Report type by keyword, defaulting to a daily summary
pub fn infer_report_type(text: &str) -> ReportType {
    let lowered = text.to_lowercase();
    TYPE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(report_type, _)| *report_type)
        .unwrap_or(ReportType::DailyOperationalSummary)
}

/// Word following "site" ("Site Alpha: ..." yields "Alpha")
pub fn extract_site_name(text: &str) -> Option<String> {
    site_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Full keyword-based extraction for a report written on `today`
pub fn heuristic_report(text: &str, today: NaiveDate) -> FieldReportExtraction {
    FieldReportExtraction {
        title: Some(default_report_title(today)),
        report_type: infer_report_type(text),
        site_name: extract_site_name(text),
        ..Default::default()
    }
}
