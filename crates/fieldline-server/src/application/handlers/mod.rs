//! Intent handlers
//!
//! One handler per intent family. Handlers translate every failure they
//! can act on into an envelope; an `Err` escaping a handler is turned into
//! the generic retry message by the orchestrator.

mod field_report;
mod list_item;
mod queries;
mod status_update;
mod task;

pub use field_report::FieldReportHandler;
pub use list_item::ListItemHandler;
pub use queries::QueryHandler;
pub use status_update::{mirror_completion, MirrorOutcome, StatusUpdateHandler};
pub use task::TaskHandler;

pub const GENERIC_ERROR: &str =
    "Sorry, I encountered an error processing your request. Please try again.";

pub const GENERAL_HELP: &str = "I can help you with tasks, field reports, and lists. Try asking me to create a task or log a field report!";

pub const UNKNOWN_INTENT_HELP: &str = "I'm not sure how to help with that. Try asking me to create a task, log a field report, or check your schedule. You can also use /help for examples.";
