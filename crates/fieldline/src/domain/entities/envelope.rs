//! ResponseEnvelope - the one shape every handler returns

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Intent;

/// Which side effect a request produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTaken {
    TaskCreated,
    FieldReportCreated,
    ListItemsAdded,
    /// Some, but not all, candidate items were stored
    ListItemsPartiallyAdded,
    TaskStatusUpdated,
}

impl ActionTaken {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionTaken::TaskCreated => "task_created",
            ActionTaken::FieldReportCreated => "field_report_created",
            ActionTaken::ListItemsAdded => "list_items_added",
            ActionTaken::ListItemsPartiallyAdded => "list_items_partially_added",
            ActionTaken::TaskStatusUpdated => "task_status_updated",
        }
    }
}

impl std::fmt::Display for ActionTaken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform result of routing one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    /// Text shown to the caller
    pub response: String,
    pub intent: Intent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<ActionTaken>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl ResponseEnvelope {
    pub fn success(intent: Intent, response: impl Into<String>) -> Self {
        Self {
            success: true,
            response: response.into(),
            intent,
            confidence: None,
            action_taken: None,
            metadata: serde_json::json!({}),
        }
    }

    pub fn failure(intent: Intent, response: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(intent, response)
        }
    }

    pub fn with_action(mut self, action: ActionTaken) -> Self {
        self.action_taken = Some(action);
        self
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Insert one metadata entry; metadata is always a JSON object
    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        if !self.metadata.is_object() {
            self.metadata = serde_json::json!({});
        }
        if let Some(map) = self.metadata.as_object_mut() {
            map.insert(key.to_string(), value.into());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serialization_shape() {
        let envelope = ResponseEnvelope::success(Intent::CreateTask, "✅ Created task: Call Anthony")
            .with_action(ActionTaken::TaskCreated)
            .with_confidence(0.82)
            .with_meta("display_id", "TASK-20250310-ABCDEF12");

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["intent"], "create_task");
        assert_eq!(json["action_taken"], "task_created");
        assert_eq!(json["metadata"]["display_id"], "TASK-20250310-ABCDEF12");
    }

    #[test]
    fn test_failure_omits_optional_fields() {
        let json = serde_json::to_value(ResponseEnvelope::failure(Intent::Unknown, "nope")).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("action_taken").is_none());
        assert!(json.get("confidence").is_none());
    }
}
