//! PostgreSQL implementation of ReminderRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fieldline::{DomainError, NewReminder, Reminder, ReminderRepository};

use super::{map_sqlx, parse_column};

pub struct PgReminderRepository {
    pool: PgPool,
}

impl PgReminderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReminderRow {
    id: Uuid,
    title: String,
    fire_at: DateTime<Utc>,
    owner_id: Uuid,
    related_task_id: Option<Uuid>,
    related_site_id: Option<Uuid>,
    status: String,
    channels: Vec<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReminderRow> for Reminder {
    type Error = DomainError;

    fn try_from(row: ReminderRow) -> Result<Self, Self::Error> {
        let channels = row
            .channels
            .iter()
            .map(|c| parse_column("channels", c))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: row.id,
            title: row.title,
            fire_at: row.fire_at,
            owner_id: row.owner_id,
            related_task_id: row.related_task_id,
            related_site_id: row.related_site_id,
            status: parse_column("status", &row.status)?,
            channels,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ReminderRepository for PgReminderRepository {
    async fn insert(&self, reminder: &NewReminder) -> Result<Reminder, DomainError> {
        let channels: Vec<String> = reminder.channels.iter().map(|c| c.to_string()).collect();

        let row = sqlx::query_as::<_, ReminderRow>(
            r#"
            INSERT INTO reminders (title, fire_at, owner_id, related_task_id, related_site_id,
                                   status, channels)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&reminder.title)
        .bind(reminder.fire_at)
        .bind(reminder.owner_id)
        .bind(reminder.related_task_id)
        .bind(reminder.related_site_id)
        .bind(reminder.status.to_string())
        .bind(&channels)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.try_into()
    }

    async fn find_for_task(&self, task_id: Uuid) -> Result<Vec<Reminder>, DomainError> {
        let rows = sqlx::query_as::<_, ReminderRow>(
            "SELECT * FROM reminders WHERE related_task_id = $1 ORDER BY fire_at",
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Reminder::try_from).collect()
    }
}
