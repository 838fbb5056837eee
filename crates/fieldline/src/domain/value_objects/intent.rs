//! Intent - what the caller is asking for

use serde::{Deserialize, Serialize};

/// Closed set of intents that drive dispatch.
///
/// Declaration order matters: the pattern classifier walks intents in
/// this order and the first intent with a matching trigger wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    CreateTask,
    CreateReminder,
    CreateFieldReport,
    AddListItem,
    QueryTasks,
    QueryLists,
    QueryReports,
    UpdateTaskStatus,
    GeneralQuery,
    Unknown,
}

impl Intent {
    /// All intents in declaration order
    pub const ALL: [Intent; 10] = [
        Intent::CreateTask,
        Intent::CreateReminder,
        Intent::CreateFieldReport,
        Intent::AddListItem,
        Intent::QueryTasks,
        Intent::QueryLists,
        Intent::QueryReports,
        Intent::UpdateTaskStatus,
        Intent::GeneralQuery,
        Intent::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::CreateTask => "create_task",
            Intent::CreateReminder => "create_reminder",
            Intent::CreateFieldReport => "create_field_report",
            Intent::AddListItem => "add_list_item",
            Intent::QueryTasks => "query_tasks",
            Intent::QueryLists => "query_lists",
            Intent::QueryReports => "query_reports",
            Intent::UpdateTaskStatus => "update_task_status",
            Intent::GeneralQuery => "general_query",
            Intent::Unknown => "unknown",
        }
    }

    /// One-line description used when prompting a language model
    pub fn description(&self) -> &'static str {
        match self {
            Intent::CreateTask => "Creating new tasks or assignments",
            Intent::CreateReminder => "Setting up reminders or alerts",
            Intent::CreateFieldReport => "Logging field observations, incidents, or site reports",
            Intent::AddListItem => "Adding items to lists (shopping, inventory, tools)",
            Intent::QueryTasks => "Asking about tasks, schedule, or assignments",
            Intent::QueryLists => "Asking about list contents or inventory",
            Intent::QueryReports => "Asking about field reports or logs",
            Intent::UpdateTaskStatus => "Marking tasks complete or updating status",
            Intent::GeneralQuery => "General questions about sites, equipment, or status",
            Intent::Unknown => "Input that doesn't fit any category",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.as_str() == wanted)
            .ok_or_else(|| format!("Unknown intent: {}", s))
    }
}

/// Classifier output. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub intent: Intent,
    /// Always within [0, 1]
    pub confidence: f32,
}

impl Classification {
    pub fn new(intent: Intent, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self { intent, confidence }
    }

    pub fn unknown(confidence: f32) -> Self {
        Self::new(Intent::Unknown, confidence)
    }
}
