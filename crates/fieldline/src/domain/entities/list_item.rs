//! ListItem - an entry on a site's equipment, supplies, safety or general list

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::truncate_chars;
use crate::domain::value_objects::{DisplayIdPrefix, ListItemStatus, ListType};

pub const LIST_ITEM_NAME_MAX_CHARS: usize = 255;

/// Persisted list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: Uuid,
    pub display_id: String,
    pub item_name: String,
    pub list_type: ListType,
    pub site_id: Option<Uuid>,
    pub added_by: Uuid,
    pub status: ListItemStatus,
    pub created_at: DateTime<Utc>,
}

/// List item fields supplied at creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListItem {
    pub display_id: String,
    pub item_name: String,
    pub list_type: ListType,
    pub site_id: Option<Uuid>,
    pub added_by: Uuid,
    pub status: ListItemStatus,
}

impl NewListItem {
    pub fn new(
        item_name: impl Into<String>,
        list_type: ListType,
        site_id: Option<Uuid>,
        added_by: Uuid,
    ) -> Self {
        Self {
            display_id: DisplayIdPrefix::ListItem.generate(),
            item_name: truncate_chars(&item_name.into(), LIST_ITEM_NAME_MAX_CHARS),
            list_type,
            site_id,
            added_by,
            status: ListItemStatus::Active,
        }
    }
}
