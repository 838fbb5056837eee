//! PostgreSQL implementation of FieldReportRepository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fieldline::{DomainError, FieldReport, FieldReportRepository, NewFieldReport};

use super::{map_sqlx, parse_column};

pub struct PgFieldReportRepository {
    pool: PgPool,
}

impl PgFieldReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FieldReportRow {
    id: Uuid,
    display_id: String,
    site_id: Option<Uuid>,
    report_date: NaiveDate,
    submitter_id: Uuid,
    report_type: String,
    title_summary: String,
    full_content: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<FieldReportRow> for FieldReport {
    type Error = DomainError;

    fn try_from(row: FieldReportRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            display_id: row.display_id,
            site_id: row.site_id,
            report_date: row.report_date,
            submitter_id: row.submitter_id,
            report_type: parse_column("report_type", &row.report_type)?,
            title_summary: row.title_summary,
            full_content: row.full_content,
            status: parse_column("status", &row.status)?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl FieldReportRepository for PgFieldReportRepository {
    async fn insert(&self, report: &NewFieldReport) -> Result<FieldReport, DomainError> {
        let row = sqlx::query_as::<_, FieldReportRow>(
            r#"
            INSERT INTO field_reports (display_id, site_id, report_date, submitter_id,
                                       report_type, title_summary, full_content, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&report.display_id)
        .bind(report.site_id)
        .bind(report.report_date)
        .bind(report.submitter_id)
        .bind(report.report_type.as_str())
        .bind(&report.title_summary)
        .bind(&report.full_content)
        .bind(report.status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.try_into()
    }

    async fn find_recent_by_site(
        &self,
        site_id: Uuid,
        limit: usize,
    ) -> Result<Vec<FieldReport>, DomainError> {
        let rows = sqlx::query_as::<_, FieldReportRow>(
            "SELECT * FROM field_reports WHERE site_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(site_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(FieldReport::try_from).collect()
    }

    async fn find_recent_by_submitter(
        &self,
        submitter_id: Uuid,
        limit: usize,
    ) -> Result<Vec<FieldReport>, DomainError> {
        let rows = sqlx::query_as::<_, FieldReportRow>(
            "SELECT * FROM field_reports WHERE submitter_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(submitter_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(FieldReport::try_from).collect()
    }
}
