//! Display ids - human-readable record identifiers
//!
//! Format: `<PREFIX>-<YYYYMMDD>-<first 8 hex chars of a v4 uuid, uppercased>`

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

/// Entity-type prefix of a display id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayIdPrefix {
    Task,
    FieldReport,
    ListItem,
    User,
}

impl DisplayIdPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayIdPrefix::Task => "TASK",
            DisplayIdPrefix::FieldReport => "FR",
            DisplayIdPrefix::ListItem => "LI",
            DisplayIdPrefix::User => "USER",
        }
    }

    /// Generate a fresh display id for today
    pub fn generate(&self) -> String {
        self.generate_with(Utc::now().date_naive(), Uuid::new_v4())
    }

    pub fn generate_with(&self, date: NaiveDate, seed: Uuid) -> String {
        let random: String = seed
            .simple()
            .to_string()
            .chars()
            .take(8)
            .collect::<String>()
            .to_uppercase();
        format!("{}-{}-{}", self.as_str(), date.format("%Y%m%d"), random)
    }
}
