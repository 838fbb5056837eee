//! Structured extraction results
//!
//! Best-effort typed guesses produced from free text.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Classification, Priority, ReportType};

/// What the extraction service is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    Classification,
    Task,
    FieldReport,
}

impl std::fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionMode::Classification => write!(f, "classification"),
            ExtractionMode::Task => write!(f, "task"),
            ExtractionMode::FieldReport => write!(f, "field_report"),
        }
    }
}

/// Task fields guessed from text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskExtraction {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_datetime: Option<DateTime<Utc>>,
    /// Source-native 1-4 scale, 4 being most urgent
    pub priority: Option<u8>,
    /// Set when the task was also created in the external task service
    pub external_id: Option<String>,
}

impl TaskExtraction {
    pub fn mapped_priority(&self) -> Priority {
        self.priority
            .map(Priority::from_source_scale)
            .unwrap_or_default()
    }

    /// Calendar day the task is due, falling back to the datetime's date
    pub fn effective_due_date(&self) -> Option<NaiveDate> {
        self.due_date
            .or_else(|| self.due_datetime.map(|dt| dt.date_naive()))
    }
}

/// Field report metadata guessed from text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldReportExtraction {
    pub title: Option<String>,
    pub report_type: ReportType,
    pub site_name: Option<String>,
    pub priority: Option<Priority>,
    pub requires_followup: Option<bool>,
    #[serde(default)]
    pub equipment_mentioned: Vec<String>,
}

/// Result of one `extract` call, tagged by mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Extraction {
    Classification(Classification),
    Task(TaskExtraction),
    FieldReport(FieldReportExtraction),
}

impl Extraction {
    pub fn mode(&self) -> ExtractionMode {
        match self {
            Extraction::Classification(_) => ExtractionMode::Classification,
            Extraction::Task(_) => ExtractionMode::Task,
            Extraction::FieldReport(_) => ExtractionMode::FieldReport,
        }
    }
}
