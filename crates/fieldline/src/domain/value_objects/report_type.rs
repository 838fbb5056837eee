//! ReportType - closed set of field report categories

use serde::{Deserialize, Serialize};

/// Field report category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    #[default]
    #[serde(rename = "Daily Operational Summary")]
    DailyOperationalSummary,
    #[serde(rename = "Incident Report")]
    IncidentReport,
    #[serde(rename = "Maintenance Log")]
    MaintenanceLog,
    #[serde(rename = "Safety Observation")]
    SafetyObservation,
    #[serde(rename = "Equipment Check")]
    EquipmentCheck,
    #[serde(rename = "Security Update")]
    SecurityUpdate,
    #[serde(rename = "Visitor Log")]
    VisitorLog,
    Other,
}

impl ReportType {
    pub const ALL: [ReportType; 8] = [
        ReportType::DailyOperationalSummary,
        ReportType::IncidentReport,
        ReportType::MaintenanceLog,
        ReportType::SafetyObservation,
        ReportType::EquipmentCheck,
        ReportType::SecurityUpdate,
        ReportType::VisitorLog,
        ReportType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::DailyOperationalSummary => "Daily Operational Summary",
            ReportType::IncidentReport => "Incident Report",
            ReportType::MaintenanceLog => "Maintenance Log",
            ReportType::SafetyObservation => "Safety Observation",
            ReportType::EquipmentCheck => "Equipment Check",
            ReportType::SecurityUpdate => "Security Update",
            ReportType::VisitorLog => "Visitor Log",
            ReportType::Other => "Other",
        }
    }

    /// Glyph shown next to the report in digests
    pub fn glyph(&self) -> &'static str {
        match self {
            ReportType::DailyOperationalSummary => "📊",
            ReportType::IncidentReport => "⚠️",
            ReportType::MaintenanceLog => "🔧",
            ReportType::SafetyObservation => "🦺",
            ReportType::EquipmentCheck => "⚙️",
            ReportType::SecurityUpdate => "🔒",
            ReportType::VisitorLog => "👤",
            ReportType::Other => "📁",
        }
    }

    /// Parse a model-produced label; unrecognized labels become `Other`
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(ReportType::Other)
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', " ");
        ReportType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().to_lowercase() == wanted)
            .ok_or_else(|| format!("Unknown report type: {}", s))
    }
}

/// Review state of a field report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    #[default]
    Submitted,
    Reviewed,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Submitted => write!(f, "Submitted"),
            ReportStatus::Reviewed => write!(f, "Reviewed"),
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Submitted" => Ok(ReportStatus::Submitted),
            "Reviewed" => Ok(ReportStatus::Reviewed),
            _ => Err(format!("Unknown report status: {}", s)),
        }
    }
}
