//! Read-only digests: tasks, lists and field reports

use std::collections::HashMap;

use uuid::Uuid;

use fieldline::domain::services::mentioned_list_type;
use fieldline::{
    CallerContext, DomainError, Intent, ListOwner, RecordStore, ResponseEnvelope, TaskQuery,
};

const TASK_LIMIT: usize = 5;
const LIST_LIMIT: usize = 10;
const REPORT_LIMIT: usize = 5;

pub struct QueryHandler {
    store: RecordStore,
}

impl QueryHandler {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Open tasks in store order, at most five, with an overflow line
    pub async fn tasks(&self, caller: &CallerContext) -> Result<ResponseEnvelope, DomainError> {
        let tasks = match self
            .store
            .tasks
            .find_for_assignee(caller.caller_id, &TaskQuery::default())
            .await
        {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::error!(caller_id = %caller.caller_id, error = %e, "Failed to load tasks");
                return Ok(ResponseEnvelope::failure(
                    Intent::QueryTasks,
                    "Sorry, I couldn't retrieve your tasks right now.",
                ));
            }
        };

        let open: Vec<_> = tasks.into_iter().filter(|t| t.status.is_open()).collect();
        if open.is_empty() {
            return Ok(ResponseEnvelope::success(
                Intent::QueryTasks,
                "You don't have any tasks assigned right now.",
            ));
        }

        let mut response = String::from("*Your Tasks:*\n");
        for task in open.iter().take(TASK_LIMIT) {
            response.push_str(&format!("{} {}", task.status.glyph(), task.title));
            if let Some(due) = task.due_date {
                response.push_str(&format!(" (Due: {})", due.format("%Y-%m-%d")));
            }
            response.push('\n');
        }
        if open.len() > TASK_LIMIT {
            response.push_str(&format!("\n...and {} more tasks", open.len() - TASK_LIMIT));
        }

        Ok(ResponseEnvelope::success(Intent::QueryTasks, response)
            .with_meta("task_count", open.len()))
    }

    /// Active items for the caller's site (or the caller), optionally one list
    pub async fn lists(
        &self,
        text: &str,
        caller: &CallerContext,
    ) -> Result<ResponseEnvelope, DomainError> {
        let list_type = mentioned_list_type(text);
        let owner = match caller.primary_site_id {
            Some(site_id) => ListOwner::Site(site_id),
            None => ListOwner::AddedBy(caller.caller_id),
        };

        let items = match self.store.list_items.find_active(owner, list_type).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(caller_id = %caller.caller_id, error = %e, "Failed to load list items");
                return Ok(ResponseEnvelope::failure(
                    Intent::QueryLists,
                    "Sorry, I couldn't retrieve the list information right now.",
                ));
            }
        };

        let heading = match list_type {
            Some(t) => format!("{} List", capitalize(t.as_str())),
            None => "Your Lists".to_string(),
        };

        if items.is_empty() {
            return Ok(ResponseEnvelope::success(
                Intent::QueryLists,
                format!("*{}*\nNothing on the list yet.", heading),
            ));
        }

        let mut response = format!("*{}*\n", heading);
        for item in items.iter().take(LIST_LIMIT) {
            match list_type {
                Some(_) => response.push_str(&format!("• {}\n", item.item_name)),
                None => response.push_str(&format!("• {} ({})\n", item.item_name, item.list_type)),
            }
        }
        if items.len() > LIST_LIMIT {
            response.push_str(&format!("\n...and {} more items", items.len() - LIST_LIMIT));
        }

        let mut envelope = ResponseEnvelope::success(Intent::QueryLists, response)
            .with_meta("item_count", items.len());
        if let Some(t) = list_type {
            envelope = envelope.with_meta("list_type", t.as_str());
        }
        Ok(envelope)
    }

    /// Five most recent reports for the caller's site, or by the caller
    pub async fn reports(&self, caller: &CallerContext) -> Result<ResponseEnvelope, DomainError> {
        let reports = match caller.primary_site_id {
            Some(site_id) => {
                self.store
                    .field_reports
                    .find_recent_by_site(site_id, REPORT_LIMIT)
                    .await
            }
            None => {
                self.store
                    .field_reports
                    .find_recent_by_submitter(caller.caller_id, REPORT_LIMIT)
                    .await
            }
        };

        let reports = match reports {
            Ok(reports) => reports,
            Err(e) => {
                tracing::error!(caller_id = %caller.caller_id, error = %e, "Failed to load field reports");
                return Ok(ResponseEnvelope::failure(
                    Intent::QueryReports,
                    "Sorry, I couldn't retrieve the field reports right now.",
                ));
            }
        };

        if reports.is_empty() {
            return Ok(ResponseEnvelope::success(
                Intent::QueryReports,
                "No field reports found.",
            ));
        }

        let mut site_names: HashMap<Uuid, Option<String>> = HashMap::new();
        let mut response = String::from("*Recent Field Reports:*\n\n");
        for report in &reports {
            response.push_str(&format!(
                "{} *{}*\n   Date: {}\n",
                report.report_type.glyph(),
                report.title_summary,
                report.report_date.format("%Y-%m-%d")
            ));
            if let Some(site_id) = report.site_id {
                if !site_names.contains_key(&site_id) {
                    let name = self
                        .store
                        .sites
                        .find_by_id(site_id)
                        .await
                        .ok()
                        .flatten()
                        .map(|s| s.name);
                    site_names.insert(site_id, name);
                }
                if let Some(Some(name)) = site_names.get(&site_id) {
                    response.push_str(&format!("   Site: {}\n", name));
                }
            }
            response.push('\n');
        }

        Ok(ResponseEnvelope::success(Intent::QueryReports, response.trim_end().to_string())
            .with_meta("report_count", reports.len()))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
