//! User Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, User};

/// Repository interface for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Active user linked to a chat platform id
    async fn find_by_external_channel_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, DomainError>;
}
