//! List Item Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, ListItem, ListType, NewListItem};

/// Whose list to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOwner {
    Site(Uuid),
    AddedBy(Uuid),
}

/// Repository interface for ListItem entities
#[async_trait]
pub trait ListItemRepository: Send + Sync {
    async fn insert(&self, item: &NewListItem) -> Result<ListItem, DomainError>;

    /// Active items, newest first; `None` list type means every list
    async fn find_active(
        &self,
        owner: ListOwner,
        list_type: Option<ListType>,
    ) -> Result<Vec<ListItem>, DomainError>;
}
