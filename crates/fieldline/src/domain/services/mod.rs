//! Domain Services
//!
//! Pure text heuristics shared by the routing handlers.

pub mod list_parsing;
pub mod pattern_classifier;
pub mod report_heuristics;
pub mod status_phrases;

pub use list_parsing::{infer_list_type, mentioned_list_type, parse_list_items};
pub use pattern_classifier::PatternClassifier;
pub use report_heuristics::{extract_site_name, heuristic_report, infer_report_type};
pub use status_phrases::{parse_status_update, RequestedStatus, StatusUpdateRequest};
