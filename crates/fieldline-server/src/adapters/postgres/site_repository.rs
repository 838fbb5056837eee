//! PostgreSQL implementation of SiteRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fieldline::{DomainError, Site, SiteRepository};

use super::map_sqlx;

pub struct PgSiteRepository {
    pool: PgPool,
}

impl PgSiteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SiteRow {
    id: Uuid,
    name: String,
    aliases: Vec<String>,
    location: Option<String>,
    is_active: bool,
    sop_document_link: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SiteRow> for Site {
    fn from(row: SiteRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            aliases: row.aliases,
            location: row.location,
            is_active: row.is_active,
            sop_document_link: row.sop_document_link,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SiteRepository for PgSiteRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Site>, DomainError> {
        let row = sqlx::query_as::<_, SiteRow>("SELECT * FROM sites WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_name_or_alias(&self, name: &str) -> Result<Option<Site>, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let exact = sqlx::query_as::<_, SiteRow>(
            "SELECT * FROM sites WHERE is_active AND LOWER(name) = LOWER($1) LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if let Some(row) = exact {
            return Ok(Some(row.into()));
        }

        let alias = sqlx::query_as::<_, SiteRow>(
            r#"
            SELECT * FROM sites
            WHERE is_active
              AND EXISTS (SELECT 1 FROM unnest(aliases) a WHERE LOWER(a) = LOWER($1))
            ORDER BY name
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(alias.map(Into::into))
    }

    async fn list_active(&self) -> Result<Vec<Site>, DomainError> {
        let rows = sqlx::query_as::<_, SiteRow>("SELECT * FROM sites WHERE is_active ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Site>, DomainError> {
        let pattern = contains_pattern(query);

        let rows = sqlx::query_as::<_, SiteRow>(
            r#"
            SELECT * FROM sites
            WHERE is_active
              AND (name ILIKE $1 ESCAPE '\'
                   OR location ILIKE $1 ESCAPE '\'
                   OR EXISTS (SELECT 1 FROM unnest(aliases) a WHERE a ILIKE $1 ESCAPE '\'))
            ORDER BY name
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn set_sop_link(&self, id: Uuid, link: &str) -> Result<Option<Site>, DomainError> {
        let row = sqlx::query_as::<_, SiteRow>(
            "UPDATE sites SET sop_document_link = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(link)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Into::into))
    }
}

/// `ILIKE` pattern matching `query` anywhere, with its wildcards taken literally
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::from("%");
    for c in query.trim().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
