//! TaskStatus - lifecycle of a task

use serde::{Deserialize, Serialize};

/// Task status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Non-terminal statuses show up in "my tasks" digests
    pub fn is_open(&self) -> bool {
        !matches!(self, TaskStatus::Completed)
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "📝",
            TaskStatus::InProgress => "🔄",
            TaskStatus::Completed => "✅",
        }
    }

    /// Interpret a loose, user-typed status word.
    ///
    /// Returns the title-cased token as `Err` when it names no known status.
    pub fn from_loose(token: &str) -> Result<Self, String> {
        let normalized = token
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");

        match normalized.as_str() {
            "todo" | "to-do" | "pending" => Ok(TaskStatus::ToDo),
            "progress" | "in-progress" | "working" => Ok(TaskStatus::InProgress),
            "done" | "complete" | "completed" => Ok(TaskStatus::Completed),
            _ => Err(title_case(token.trim())),
        }
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "To Do" => Ok(TaskStatus::ToDo),
            "In Progress" => Ok(TaskStatus::InProgress),
            "Completed" => Ok(TaskStatus::Completed),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}
