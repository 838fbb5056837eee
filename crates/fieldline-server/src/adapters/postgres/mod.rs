//! PostgreSQL Repository Implementations

mod field_report_repository;
mod list_item_repository;
mod reminder_repository;
mod site_repository;
mod task_repository;
mod user_repository;

use std::str::FromStr;
use std::sync::Arc;

use sqlx::PgPool;

use fieldline::{DomainError, RecordStore};

pub use field_report_repository::PgFieldReportRepository;
pub use list_item_repository::PgListItemRepository;
pub use reminder_repository::PgReminderRepository;
pub use site_repository::PgSiteRepository;
pub use task_repository::PgTaskRepository;
pub use user_repository::PgUserRepository;

/// Postgres-backed record store
pub fn record_store(pool: &PgPool) -> RecordStore {
    RecordStore {
        tasks: Arc::new(PgTaskRepository::new(pool.clone())),
        reminders: Arc::new(PgReminderRepository::new(pool.clone())),
        field_reports: Arc::new(PgFieldReportRepository::new(pool.clone())),
        list_items: Arc::new(PgListItemRepository::new(pool.clone())),
        sites: Arc::new(PgSiteRepository::new(pool.clone())),
        users: Arc::new(PgUserRepository::new(pool.clone())),
    }
}

/// Connectivity problems are `Unavailable`; everything else the database
/// rejected is a `Repository` error.
pub(crate) fn map_sqlx(err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => DomainError::Unavailable(err.to_string()),
        other => DomainError::Repository(other.to_string()),
    }
}

/// Parse an enum stored as text
pub(crate) fn parse_column<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e| DomainError::Repository(format!("bad value in {}: {}", column, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldline::TaskStatus;

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert!(matches!(
            map_sqlx(sqlx::Error::PoolTimedOut),
            DomainError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx(sqlx::Error::RowNotFound),
            DomainError::Repository(_)
        ));
    }

    #[test]
    fn test_parse_column() {
        let status: TaskStatus = parse_column("status", "In Progress").unwrap();
        assert_eq!(status, TaskStatus::InProgress);
        assert!(parse_column::<TaskStatus>("status", "Blocked").is_err());
    }
}
