//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod google_drive;
pub mod llm_extractor;
pub mod openai;
pub mod postgres;
pub mod todoist;

// Re-exports
pub use google_drive::GoogleDriveStorage;
pub use llm_extractor::LlmExtractor;
pub use openai::OpenAiProvider;
pub use todoist::TodoistClient;
