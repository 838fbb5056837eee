//! Two-tier intent classifier
//!
//! Asks the model first; any failure (timeout, malformed answer,
//! unavailable service) falls back to the pattern table, which always
//! answers.

use std::sync::Arc;

use fieldline::domain::services::PatternClassifier;
use fieldline::{Classification, StructuredExtractor};

pub struct IntentClassifier {
    model: Option<Arc<dyn StructuredExtractor>>,
    patterns: PatternClassifier,
}

impl IntentClassifier {
    pub fn new(model: Option<Arc<dyn StructuredExtractor>>) -> Self {
        Self {
            model,
            patterns: PatternClassifier::new(),
        }
    }

    /// Pattern-only classifier
    pub fn offline() -> Self {
        Self::new(None)
    }

    pub async fn classify(&self, text: &str) -> Classification {
        if let Some(model) = &self.model {
            match model.classify(text).await {
                Ok(classification) => return classification,
                Err(e) => {
                    tracing::warn!(
                        extractor = %model.name(),
                        error = %e,
                        "Model classification failed, falling back to patterns"
                    );
                }
            }
        }

        self.patterns.classify(text)
    }
}
