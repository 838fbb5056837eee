//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Task / Reminder: work items and their scheduled nudges
//! - FieldReport: verbatim site narratives with inferred metadata
//! - ListItem: equipment, supplies and safety lists
//! - Site / User: reference data
//! - CallerContext / ResponseEnvelope: request-scoped input and output

mod caller;
mod envelope;
mod field_report;
mod list_item;
mod reminder;
mod site;
mod task;
mod user;

pub use caller::*;
pub use envelope::*;
pub use field_report::*;
pub use list_item::*;
pub use reminder::*;
pub use site::*;
pub use task::*;
pub use user::*;

/// Cut to at most `max` chars; column limits are in characters
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
