//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod field_report_repository;
mod list_item_repository;
mod reminder_repository;
mod site_repository;
mod task_repository;
mod user_repository;

use std::sync::Arc;

pub use field_report_repository::*;
pub use list_item_repository::*;
pub use reminder_repository::*;
pub use site_repository::*;
pub use task_repository::*;
pub use user_repository::*;

/// The record store: one repository per entity type
#[derive(Clone)]
pub struct RecordStore {
    pub tasks: Arc<dyn TaskRepository>,
    pub reminders: Arc<dyn ReminderRepository>,
    pub field_reports: Arc<dyn FieldReportRepository>,
    pub list_items: Arc<dyn ListItemRepository>,
    pub sites: Arc<dyn SiteRepository>,
    pub users: Arc<dyn UserRepository>,
}
