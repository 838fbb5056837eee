//! Fieldline API Models
//!
//! Request/response DTOs for the HTTP API. Domain entities stay free of
//! OpenAPI concerns; these types convert from them.

mod field_report;
mod nlp;
mod site;
mod task;

pub use field_report::*;
pub use nlp::*;
pub use site::*;
pub use task::*;
