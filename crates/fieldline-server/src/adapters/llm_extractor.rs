//! Language-model backed StructuredExtractor
//!
//! Prompts the model per extraction mode and parses its answer into the
//! typed extraction results. Malformed answers are `DomainError::Extraction`
//! so callers can fall back to their heuristics.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use fieldline::{
    Classification, CompletionOptions, DomainError, Extraction, ExtractionMode,
    FieldReportExtraction, Intent, LlmProvider, Priority, ReportType, StructuredExtractor,
    TaskExtraction,
};

const CLASSIFICATION_MAX_TOKENS: u32 = 50;
const FIELD_REPORT_MAX_TOKENS: u32 = 200;

/// StructuredExtractor that asks a language model
pub struct LlmExtractor {
    llm: Arc<dyn LlmProvider>,
    max_tokens: u32,
}

impl LlmExtractor {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            llm,
            max_tokens: 1000,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    async fn ask(&self, system: &str, text: &str, max_tokens: u32) -> Result<String, DomainError> {
        let options = CompletionOptions::precise(max_tokens.min(self.max_tokens));
        self.llm.complete_with_system(system, text, &options).await
    }
}

#[async_trait]
impl StructuredExtractor for LlmExtractor {
    async fn extract(&self, text: &str, mode: ExtractionMode) -> Result<Extraction, DomainError> {
        match mode {
            ExtractionMode::Classification => {
                let raw = self
                    .ask(&classification_prompt(), text, CLASSIFICATION_MAX_TOKENS)
                    .await?;
                parse_classification(&raw).map(Extraction::Classification)
            }
            ExtractionMode::Task => {
                let today = Utc::now().date_naive();
                let raw = self.ask(&task_prompt(today), text, self.max_tokens).await?;
                parse_task(&raw).map(Extraction::Task)
            }
            ExtractionMode::FieldReport => {
                let raw = self
                    .ask(&field_report_prompt(), text, FIELD_REPORT_MAX_TOKENS)
                    .await?;
                parse_field_report(&raw).map(Extraction::FieldReport)
            }
        }
    }

    fn name(&self) -> &str {
        self.llm.provider_name()
    }
}

fn classification_prompt() -> String {
    let intents = Intent::ALL
        .iter()
        .map(|i| format!("- {}: {}", i.as_str(), i.description()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an intent classifier for a field technician management system.\n\
         Classify the user's input into one of these intents:\n\n\
         {intents}\n\n\
         Respond with just the intent name and a confidence score (0.0-1.0).\n\
         Format: intent_name,confidence_score"
    )
}

fn task_prompt(today: NaiveDate) -> String {
    format!(
        "Extract a task from the user's message. Today is {today}.\n\
         Return only a JSON object with these fields:\n\
         - title: short imperative summary\n\
         - description: extra detail, or null\n\
         - due_date: YYYY-MM-DD, or null\n\
         - due_datetime: RFC 3339 timestamp when a time of day is given, or null\n\
         - priority: integer 1 (lowest) to 4 (most urgent), or null",
        today = today.format("%Y-%m-%d")
    )
}

fn field_report_prompt() -> String {
    let types = ReportType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Extract structured information from this field report text.\n\
         Return a JSON object with these fields:\n\
         - title: Brief summary (max 100 chars)\n\
         - report_type: One of: {types}\n\
         - site_name: Site name if mentioned\n\
         - equipment_mentioned: List of equipment/systems mentioned\n\
         - priority_level: High, Medium, or Low based on content\n\
         - requires_followup: true/false\n\n\
         Only include fields that can be determined from the text."
    )
}

/// Parse `intent_name,confidence`.
///
/// Anything other than exactly two fields is a model failure. Two fields
/// with an unknown intent or an unreadable number degrade to
/// `(Unknown, 0.5)`.
pub fn parse_classification(raw: &str) -> Result<Classification, DomainError> {
    let raw = raw.trim();
    let fields: Vec<&str> = raw.split(',').collect();
    if raw.is_empty() || fields.len() != 2 {
        return Err(DomainError::Extraction(format!(
            "expected 'intent,confidence', got '{}'",
            raw
        )));
    }

    let intent = fields[0].trim().parse::<Intent>();
    let confidence = fields[1].trim().parse::<f32>();

    match (intent, confidence) {
        (Ok(intent), Ok(confidence)) if confidence.is_finite() => {
            Ok(Classification::new(intent, confidence))
        }
        _ => {
            tracing::warn!(answer = %raw, "Unrecognized classification answer");
            Ok(Classification::unknown(0.5))
        }
    }
}

/// Strip a surrounding ``` fence, if any
fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn parse_json<'a, T: Deserialize<'a>>(raw: &'a str, what: &str) -> Result<T, DomainError> {
    serde_json::from_str(strip_fences(raw))
        .map_err(|e| DomainError::Extraction(format!("unparseable {} JSON: {}", what, e)))
}

#[derive(Deserialize)]
struct RawTask {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    due_datetime: Option<String>,
    #[serde(default)]
    priority: Option<Value>,
}

pub fn parse_task(raw: &str) -> Result<TaskExtraction, DomainError> {
    let parsed: RawTask = parse_json(raw, "task")?;

    let title = parsed
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| DomainError::Extraction("task has no title".to_string()))?;

    Ok(TaskExtraction {
        title,
        description: parsed
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        due_date: parsed.due_date.as_deref().and_then(parse_date),
        due_datetime: parsed.due_datetime.as_deref().and_then(parse_datetime),
        priority: parsed.priority.as_ref().and_then(priority_level),
        external_id: None,
    })
}

#[derive(Deserialize)]
struct RawFieldReport {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    report_type: Option<String>,
    #[serde(default)]
    site_name: Option<String>,
    #[serde(default)]
    equipment_mentioned: Vec<String>,
    #[serde(default)]
    priority_level: Option<String>,
    #[serde(default)]
    requires_followup: Option<bool>,
}

pub fn parse_field_report(raw: &str) -> Result<FieldReportExtraction, DomainError> {
    let parsed: RawFieldReport = parse_json(raw, "field report")?;

    Ok(FieldReportExtraction {
        title: parsed.title.filter(|t| !t.trim().is_empty()),
        report_type: parsed
            .report_type
            .as_deref()
            .map(ReportType::from_label)
            .unwrap_or_default(),
        site_name: parsed.site_name.filter(|s| !s.trim().is_empty()),
        priority: parsed
            .priority_level
            .as_deref()
            .and_then(|p| p.parse::<Priority>().ok()),
        requires_followup: parsed.requires_followup,
        equipment_mentioned: parsed.equipment_mentioned,
    })
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(value).map(|dt| dt.date_naive()))
}

/// RFC 3339, or a naive timestamp taken as UTC
pub(crate) fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

fn priority_level(value: &Value) -> Option<u8> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
