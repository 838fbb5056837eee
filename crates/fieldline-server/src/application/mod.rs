//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

pub mod bounded;
pub mod classifier;
pub mod extraction;
pub mod handlers;
pub mod orchestrator;

mod chat_service;
mod report_service;
mod site_service;
mod task_service;

#[cfg(test)]
pub mod testing;

pub use bounded::{BoundedDocumentStorage, BoundedExtractor, BoundedTaskSync};
pub use chat_service::ChatService;
pub use classifier::IntentClassifier;
pub use extraction::ExtractionRouter;
pub use orchestrator::Orchestrator;
pub use report_service::ReportService;
pub use site_service::SiteService;
pub use task_service::TaskService;
