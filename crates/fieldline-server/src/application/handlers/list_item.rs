//! Adding items to lists

use futures::future::join_all;

use fieldline::domain::services::{infer_list_type, parse_list_items};
use fieldline::{
    ActionTaken, CallerContext, DomainError, Intent, NewListItem, RecordStore, ResponseEnvelope,
};

const NO_ITEMS: &str = "I couldn't identify what items to add. Please specify the items clearly.";
const NONE_ADDED: &str = "Sorry, I couldn't add any items to the list. Please try again.";

pub struct ListItemHandler {
    store: RecordStore,
}

impl ListItemHandler {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Insert one item per candidate. Inserts run concurrently and a
    /// failed insert never cancels the others.
    pub async fn handle(
        &self,
        text: &str,
        caller: &CallerContext,
    ) -> Result<ResponseEnvelope, DomainError> {
        let candidates = parse_list_items(text);
        if candidates.is_empty() {
            return Ok(ResponseEnvelope::failure(Intent::AddListItem, NO_ITEMS));
        }

        let list_type = infer_list_type(text);
        let site_id = caller.primary_site_id;

        let inserts = candidates.iter().map(|name| {
            let item = NewListItem::new(name, list_type, site_id, caller.caller_id);
            let repo = self.store.list_items.clone();
            async move { repo.insert(&item).await }
        });
        let results = join_all(inserts).await;

        let mut added = Vec::new();
        let mut failed = Vec::new();
        for (name, result) in candidates.iter().zip(results) {
            match result {
                Ok(item) => added.push(item.item_name),
                Err(e) => {
                    tracing::error!(
                        caller_id = %caller.caller_id,
                        item = %name,
                        error = %e,
                        "Failed to add list item"
                    );
                    failed.push(name.clone());
                }
            }
        }

        if added.is_empty() {
            return Ok(ResponseEnvelope::failure(Intent::AddListItem, NONE_ADDED)
                .with_meta("items_failed", failed));
        }

        let mut response = format!("✅ Added to {} list: {}", list_type, added.join(", "));
        if let Some(site_id) = site_id {
            match self.store.sites.find_by_id(site_id).await {
                Ok(Some(site)) => response.push_str(&format!("\nSite: {}", site.name)),
                Ok(None) => {}
                Err(e) => tracing::warn!(site_id = %site_id, error = %e, "Site lookup failed"),
            }
        }

        let action = if failed.is_empty() {
            ActionTaken::ListItemsAdded
        } else {
            ActionTaken::ListItemsPartiallyAdded
        };

        Ok(ResponseEnvelope::success(Intent::AddListItem, response)
            .with_action(action)
            .with_meta("list_type", list_type.as_str())
            .with_meta("items_added", added)
            .with_meta("items_failed", failed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{caller, InMemoryStore};
    use fieldline::ListType;

    #[tokio::test]
    async fn test_adds_every_item() {
        let store = InMemoryStore::new();
        let site = store.add_site("Alpha", &[]);
        let handler = ListItemHandler::new(store.record_store());

        let envelope = handler
            .handle("add hard hats, gloves and goggles to the safety list", &caller(Some(site.id)))
            .await
            .unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.action_taken, Some(ActionTaken::ListItemsAdded));
        assert_eq!(
            envelope.response,
            "✅ Added to safety list: hard hats, gloves, goggles\nSite: Alpha"
        );
        let items = store.list_items.lock().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.list_type == ListType::Safety));
        assert!(items.iter().all(|i| i.site_id == Some(site.id)));
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_successful_items() {
        let store = InMemoryStore::new();
        store.fail_list_item("wrench");
        let handler = ListItemHandler::new(store.record_store());

        let envelope = handler
            .handle("add hammer, wrench and drill to the tool list", &caller(None))
            .await
            .unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.action_taken, Some(ActionTaken::ListItemsPartiallyAdded));
        assert_eq!(envelope.response, "✅ Added to equipment list: hammer, drill");
        assert_eq!(envelope.metadata["items_failed"][0], "wrench");
        assert_eq!(store.list_items.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_all_inserts_failing() {
        let store = InMemoryStore::new();
        store.fail_list_item("tape");
        let handler = ListItemHandler::new(store.record_store());

        let envelope = handler.handle("add tape", &caller(None)).await.unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.response, NONE_ADDED);
    }

    #[tokio::test]
    async fn test_no_items_asks_for_clarification() {
        let store = InMemoryStore::new();
        let handler = ListItemHandler::new(store.record_store());

        let envelope = handler
            .handle("put something on the list", &caller(None))
            .await
            .unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.response, NO_ITEMS);
        assert_eq!(store.writes(), 0);
    }
}
