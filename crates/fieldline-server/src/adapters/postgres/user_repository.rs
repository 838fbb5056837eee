//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fieldline::{DomainError, User, UserRepository};

use super::map_sqlx;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    display_id: String,
    external_channel_id: Option<String>,
    username: Option<String>,
    first_name: String,
    last_name: String,
    role: String,
    primary_site_id: Option<Uuid>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            display_id: row.display_id,
            external_channel_id: row.external_channel_id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            role: row.role,
            primary_site_id: row.primary_site_id,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_external_channel_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT * FROM users WHERE external_channel_id = $1 AND is_active",
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Into::into))
    }
}
