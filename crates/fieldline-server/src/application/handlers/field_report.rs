//! Field report logging

use std::sync::Arc;

use chrono::Utc;

use fieldline::domain::services::heuristic_report;
use fieldline::{
    ActionTaken, CallerContext, DomainError, Intent, NewFieldReport, RecordStore,
    ResponseEnvelope, Site, StructuredExtractor,
};

const STORE_FAILURE: &str =
    "Sorry, I couldn't log that field report right now. Please try again.";

pub struct FieldReportHandler {
    store: RecordStore,
    extractor: Arc<dyn StructuredExtractor>,
}

impl FieldReportHandler {
    pub fn new(store: RecordStore, extractor: Arc<dyn StructuredExtractor>) -> Self {
        Self { store, extractor }
    }

    /// Log `text` verbatim as a field report; only metadata is inferred.
    pub async fn handle(
        &self,
        text: &str,
        caller: &CallerContext,
    ) -> Result<ResponseEnvelope, DomainError> {
        let (extracted, source) = match self.extractor.extract_field_report(text).await {
            Ok(extracted) => (extracted, "model"),
            Err(e) => {
                tracing::warn!(
                    caller_id = %caller.caller_id,
                    error = %e,
                    "Report extraction failed, using keyword heuristics"
                );
                (heuristic_report(text, Utc::now().date_naive()), "heuristic")
            }
        };

        let named_site = match &extracted.site_name {
            Some(name) => self.resolve_site(name).await,
            None => None,
        };
        let site = match named_site {
            Some(site) => Some(site),
            None => match caller.primary_site_id {
                Some(id) => self.site_by_id(id).await,
                None => None,
            },
        };
        let site_id = site.as_ref().map(|s| s.id).or(caller.primary_site_id);

        let report = NewFieldReport::new(caller.caller_id, text)
            .with_site(site_id)
            .with_type(extracted.report_type)
            .with_title(extracted.title.clone());

        let report = match self.store.field_reports.insert(&report).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(
                    caller_id = %caller.caller_id,
                    display_id = %report.display_id,
                    error = %e,
                    "Failed to store field report"
                );
                return Ok(ResponseEnvelope::failure(
                    Intent::CreateFieldReport,
                    STORE_FAILURE,
                ));
            }
        };

        tracing::info!(
            caller_id = %caller.caller_id,
            display_id = %report.display_id,
            report_type = %report.report_type,
            "Logged field report"
        );

        let mut response = format!("📝 Field report logged: {}", report.title_summary);
        if let Some(site) = &site {
            response.push_str(&format!("\nSite: {}", site.name));
        }

        let mut envelope = ResponseEnvelope::success(Intent::CreateFieldReport, response)
            .with_action(ActionTaken::FieldReportCreated)
            .with_meta("report_id", report.id.to_string())
            .with_meta("display_id", report.display_id.as_str())
            .with_meta("report_type", report.report_type.as_str())
            .with_meta("extraction", source);
        if let Some(followup) = extracted.requires_followup {
            envelope = envelope.with_meta("requires_followup", followup);
        }
        Ok(envelope)
    }

    /// Unresolvable names never block the report
    async fn resolve_site(&self, name: &str) -> Option<Site> {
        match self.store.sites.find_by_name_or_alias(name).await {
            Ok(site) => {
                if site.is_none() {
                    tracing::debug!(site_name = %name, "Report names an unknown site");
                }
                site
            }
            Err(e) => {
                tracing::warn!(site_name = %name, error = %e, "Site lookup failed");
                None
            }
        }
    }

    async fn site_by_id(&self, id: uuid::Uuid) -> Option<Site> {
        self.store
            .sites
            .find_by_id(id)
            .await
            .inspect_err(|e| tracing::warn!(site_id = %id, error = %e, "Site lookup failed"))
            .ok()
            .flatten()
    }
}
