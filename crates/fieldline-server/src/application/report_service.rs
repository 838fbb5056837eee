//! Field Report Application Service (Use Case)

use uuid::Uuid;

use fieldline::{DomainError, FieldReport, NewFieldReport, RecordStore};

pub const DEFAULT_REPORT_LIMIT: usize = 50;

/// Application service for structured field report operations
pub struct ReportService {
    store: RecordStore,
}

impl ReportService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Store a report; `full_content` is kept exactly as given
    pub async fn create(&self, report: NewFieldReport) -> Result<FieldReport, DomainError> {
        if report.full_content.trim().is_empty() {
            return Err(DomainError::Validation(
                "Report content is required".to_string(),
            ));
        }

        let saved = self.store.field_reports.insert(&report).await?;
        tracing::info!(display_id = %saved.display_id, "Logged field report: {}", saved.title_summary);
        Ok(saved)
    }

    pub async fn list_for_site(
        &self,
        site_id: Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<FieldReport>, DomainError> {
        self.store
            .field_reports
            .find_recent_by_site(site_id, limit.unwrap_or(DEFAULT_REPORT_LIMIT))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryStore;
    use fieldline::ReportType;

    #[tokio::test]
    async fn test_create_keeps_content_verbatim() {
        let store = InMemoryStore::new();
        let service = ReportService::new(store.record_store());
        let content = "  Generator at 80% load.\nFuel good.  ";

        let saved = service
            .create(
                NewFieldReport::new(Uuid::new_v4(), content)
                    .with_type(ReportType::EquipmentCheck),
            )
            .await
            .unwrap();

        assert_eq!(saved.full_content, content);
        assert_eq!(saved.report_type, ReportType::EquipmentCheck);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_content() {
        let store = InMemoryStore::new();
        let service = ReportService::new(store.record_store());

        let result = service.create(NewFieldReport::new(Uuid::new_v4(), " ")).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_for_site_respects_limit() {
        let store = InMemoryStore::new();
        let site = store.add_site("Alpha", &[]);
        let service = ReportService::new(store.record_store());
        for i in 0..3 {
            service
                .create(
                    NewFieldReport::new(Uuid::new_v4(), format!("report {i}"))
                        .with_site(Some(site.id)),
                )
                .await
                .unwrap();
        }

        let reports = service.list_for_site(site.id, Some(2)).await.unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].full_content, "report 2");
    }
}
