//! PostgreSQL implementation of TaskRepository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fieldline::{DomainError, NewTask, Task, TaskQuery, TaskRepository, TaskStatusChange};

use super::{map_sqlx, parse_column};

/// PostgreSQL implementation of TaskRepository
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    display_id: String,
    title: String,
    detailed_description: Option<String>,
    assignee_id: Uuid,
    site_id: Option<Uuid>,
    due_date: Option<NaiveDate>,
    priority: String,
    status: String,
    external_sync_id: Option<String>,
    creator_id: Uuid,
    completion_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = DomainError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            display_id: row.display_id,
            title: row.title,
            detailed_description: row.detailed_description,
            assignee_id: row.assignee_id,
            site_id: row.site_id,
            due_date: row.due_date,
            priority: parse_column("priority", &row.priority)?,
            status: parse_column("status", &row.status)?,
            external_sync_id: row.external_sync_id,
            creator_id: row.creator_id,
            completion_date: row.completion_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn insert(&self, task: &NewTask) -> Result<Task, DomainError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (display_id, title, detailed_description, assignee_id, site_id,
                               due_date, priority, status, external_sync_id, creator_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&task.display_id)
        .bind(&task.title)
        .bind(&task.detailed_description)
        .bind(task.assignee_id)
        .bind(task.site_id)
        .bind(task.due_date)
        .bind(task.priority.as_str())
        .bind(task.status.as_str())
        .bind(&task.external_sync_id)
        .bind(task.creator_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, DomainError> {
        let row = sqlx::query_as::<_, TaskRow>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Task::try_from).transpose()
    }

    async fn find_for_assignee(
        &self,
        assignee_id: Uuid,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, DomainError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT * FROM tasks
            WHERE assignee_id = $1
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(assignee_id)
        .bind(query.status.map(|s| s.as_str()))
        .bind(query.limit.map(|l| l as i64))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        change: TaskStatusChange,
    ) -> Result<Option<Task>, DomainError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks
            SET status = $2, completion_date = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(change.status.as_str())
        .bind(change.completion_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Task::try_from).transpose()
    }
}
