//! PostgreSQL implementation of ListItemRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fieldline::{DomainError, ListItem, ListItemRepository, ListOwner, ListType, NewListItem};

use super::{map_sqlx, parse_column};

pub struct PgListItemRepository {
    pool: PgPool,
}

impl PgListItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ListItemRow {
    id: Uuid,
    display_id: String,
    item_name: String,
    list_type: String,
    site_id: Option<Uuid>,
    added_by: Uuid,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ListItemRow> for ListItem {
    type Error = DomainError;

    fn try_from(row: ListItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            display_id: row.display_id,
            item_name: row.item_name,
            list_type: parse_column("list_type", &row.list_type)?,
            site_id: row.site_id,
            added_by: row.added_by,
            status: parse_column("status", &row.status)?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ListItemRepository for PgListItemRepository {
    async fn insert(&self, item: &NewListItem) -> Result<ListItem, DomainError> {
        let row = sqlx::query_as::<_, ListItemRow>(
            r#"
            INSERT INTO list_items (display_id, item_name, list_type, site_id, added_by, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&item.display_id)
        .bind(&item.item_name)
        .bind(item.list_type.as_str())
        .bind(item.site_id)
        .bind(item.added_by)
        .bind(item.status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.try_into()
    }

    async fn find_active(
        &self,
        owner: ListOwner,
        list_type: Option<ListType>,
    ) -> Result<Vec<ListItem>, DomainError> {
        let (site_id, added_by) = match owner {
            ListOwner::Site(id) => (Some(id), None),
            ListOwner::AddedBy(id) => (None, Some(id)),
        };

        let rows = sqlx::query_as::<_, ListItemRow>(
            r#"
            SELECT * FROM list_items
            WHERE status = 'Active'
              AND ($1::UUID IS NULL OR site_id = $1)
              AND ($2::UUID IS NULL OR added_by = $2)
              AND ($3::TEXT IS NULL OR list_type = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(site_id)
        .bind(added_by)
        .bind(list_type.map(|t| t.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(ListItem::try_from).collect()
    }
}
