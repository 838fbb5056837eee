//! ListType - which list an item belongs to

use serde::{Deserialize, Serialize};

/// List category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    General,
    Equipment,
    Supplies,
    Safety,
}

impl ListType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListType::General => "general",
            ListType::Equipment => "equipment",
            ListType::Supplies => "supplies",
            ListType::Safety => "safety",
        }
    }
}

impl std::fmt::Display for ListType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ListType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(ListType::General),
            "equipment" => Ok(ListType::Equipment),
            "supplies" => Ok(ListType::Supplies),
            "safety" => Ok(ListType::Safety),
            _ => Err(format!("Unknown list type: {}", s)),
        }
    }
}

/// Whether a list item is still on the list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListItemStatus {
    #[default]
    Active,
    Removed,
}

impl std::fmt::Display for ListItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListItemStatus::Active => write!(f, "Active"),
            ListItemStatus::Removed => write!(f, "Removed"),
        }
    }
}

impl std::str::FromStr for ListItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(ListItemStatus::Active),
            "Removed" => Ok(ListItemStatus::Removed),
            _ => Err(format!("Unknown list item status: {}", s)),
        }
    }
}
