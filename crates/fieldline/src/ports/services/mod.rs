//! Service Ports
//!
//! Abstract interfaces for external services.

mod document_storage;
mod extraction;
mod llm_provider;
mod task_sync;

pub use document_storage::*;
pub use extraction::*;
pub use llm_provider::*;
pub use task_sync::*;
