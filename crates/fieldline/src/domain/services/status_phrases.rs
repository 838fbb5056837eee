//! Parsing task status updates from free text
//!
//! Purely pattern based; no model call is involved.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::value_objects::TaskStatus;

/// Status the caller asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedStatus {
    Known(TaskStatus),
    /// Title-cased word that names no status
    Unrecognized(String),
}

/// Reference to a task plus the requested status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdateRequest {
    pub reference: String,
    pub target: RequestedStatus,
}

struct StatusPatterns {
    completion: Vec<Regex>,
    explicit: Regex,
}

fn patterns() -> &'static StatusPatterns {
    static PATTERNS: OnceLock<StatusPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let completion = [
            r#"(?i)complete\s+(?:task\s+)?(.+)"#,
            r#"(?i)mark\s+["']?(.+?)["']?\s+as\s+(?:done|complete|completed)"#,
            r#"(?i)finish\s+(?:task\s+)?(.+)"#,
            r#"(?i)done\s+with\s+(?:task\s+)?(.+)"#,
        ]
        .iter()
        .map(|p| Regex::new(p).expect("completion pattern is valid"))
        .collect();

        let explicit = Regex::new(
            r"(?i)(?:update|change)\s+(?:task\s+)?(.+?)\s+(?:to|status\s+to)\s+([\w-]+(?:\s+progress)?)",
        )
        .expect("status pattern is valid");

        StatusPatterns {
            completion,
            explicit,
        }
    })
}

fn clean_reference(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(['.', '!', '?'])
        .trim_matches(['"', '\''])
        .trim()
        .to_string()
}

/// `None` when no task reference could be found
pub fn parse_status_update(text: &str) -> Option<StatusUpdateRequest> {
    let patterns = patterns();

    for pattern in &patterns.completion {
        if let Some(reference) = pattern.captures(text).and_then(|c| c.get(1)) {
            let reference = clean_reference(reference.as_str());
            if !reference.is_empty() {
                return Some(StatusUpdateRequest {
                    reference,
                    target: RequestedStatus::Known(TaskStatus::Completed),
                });
            }
        }
    }

    let caps = patterns.explicit.captures(text)?;
    let reference = clean_reference(caps.get(1)?.as_str());
    if reference.is_empty() {
        return None;
    }
    let target = match TaskStatus::from_loose(caps.get(2)?.as_str()) {
        Ok(status) => RequestedStatus::Known(status),
        Err(title_cased) => RequestedStatus::Unrecognized(title_cased),
    };

    Some(StatusUpdateRequest { reference, target })
}
