//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod display_id;
mod extraction;
mod intent;
mod list_type;
mod priority;
mod reminder;
mod report_type;
mod task_status;

pub use display_id::*;
pub use extraction::*;
pub use intent::*;
pub use list_type::*;
pub use priority::*;
pub use reminder::*;
pub use report_type::*;
pub use task_status::*;
