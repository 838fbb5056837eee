//! Pattern-based intent classification
//!
//! Works fully offline. Each intent owns an ordered list of regex
//! triggers; intents are tried in declaration order and the first one
//! with a matching trigger wins.

use regex::Regex;

use crate::domain::value_objects::{Classification, Intent};

const UNMATCHED_CONFIDENCE: f32 = 0.1;
const MIN_CONFIDENCE: f32 = 0.7;
const MAX_CONFIDENCE: f32 = 0.9;

const TRIGGERS: &[(Intent, &[&str])] = &[
    (
        Intent::CreateTask,
        &[
            r"\b(create|add|new)\s+(task|todo|assignment)\b",
            r"\btask\s*:\s*",
            r"\b(remind|tell)\s+\w+\s+to\b",
            r"\bneed\s+to\b",
            r"\bschedule\b.*\bfor\b",
        ],
    ),
    (
        Intent::CreateReminder,
        &[
            r"\b(remind|reminder)\b",
            r"\b(alert|notify)\s+me\b",
            r"\b(don't\s+forget|remember)\b",
            r"\bat\s+\d+\s*(am|pm|:)\b",
        ],
    ),
    (
        Intent::CreateFieldReport,
        &[
            r"\b(field\s+report|report|log|incident)\b",
            r"\bsite\s+\w+\s*:\s*",
            r"\b(noticed|observed|found|checked)\b",
            r"\b(generator|equipment|pump|system)\b.*\b(running|working|issue|problem)\b",
        ],
    ),
    (
        Intent::AddListItem,
        &[
            r"\b(add|put)\b.*\b(to|on)\b.*\b(list|inventory)\b",
            r"\b(shopping|tool|equipment)\s+list\b",
            r"\bneed\b.*\b(supplies|parts|tools)\b",
        ],
    ),
    (
        Intent::QueryTasks,
        &[
            r"\b(what|show|list|check)\b.*\b(task|todo|assignment)\b",
            r"\bmy\s+(schedule|work|tasks)\b",
            r"\bwhat.*\b(today|tomorrow|this\s+week)\b",
            r"\bdue\s+(today|soon)\b",
        ],
    ),
    (
        Intent::QueryLists,
        &[
            r"\b(show|check|what)\b.*\blist\b",
            r"\b(shopping|inventory|equipment)\s+list\b",
            r"\bwhat.*\b(need|supplies|tools)\b",
        ],
    ),
    (
        Intent::QueryReports,
        &[
            r"\b(show|check|view)\b.*\b(report|reports)\b",
            r"\brecent\s+(reports|logs)\b",
            r"\breport\s+(history|status)\b",
        ],
    ),
    (
        Intent::UpdateTaskStatus,
        &[
            r"\b(done|complete|completed|finish|finished)\b",
            r"\bmark.*\b(complete|done)\b",
            r"\b(close|cancel)\s+(task|todo)\b",
        ],
    ),
];

struct Trigger {
    source: &'static str,
    regex: Regex,
}

impl Trigger {
    /// Longer triggers are more specific and score higher
    fn confidence(&self) -> f32 {
        (MIN_CONFIDENCE + self.source.len() as f32 / 1000.0).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
    }
}

/// Deterministic regex classifier
pub struct PatternClassifier {
    table: Vec<(Intent, Vec<Trigger>)>,
}

impl PatternClassifier {
    pub fn new() -> Self {
        let table = TRIGGERS
            .iter()
            .map(|(intent, sources)| {
                let triggers = sources
                    .iter()
                    .map(|source| Trigger {
                        source: *source,
                        regex: Regex::new(source).expect("trigger table holds valid patterns"),
                    })
                    .collect();
                (*intent, triggers)
            })
            .collect();
        Self { table }
    }

    /// Never fails; unmatched input is `Unknown` with low confidence
    pub fn classify(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();

        for (intent, triggers) in &self.table {
            if let Some(trigger) = triggers.iter().find(|t| t.regex.is_match(&lowered)) {
                return Classification::new(*intent, trigger.confidence());
            }
        }

        Classification::unknown(UNMATCHED_CONFIDENCE)
    }
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self::new()
    }
}
