//! In-memory fakes of every port, for tests

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use fieldline::{
    CallerContext, ChatIntegration, Classification, DocumentStorage, DomainError, Extraction,
    ExtractionMode, FieldReport, FieldReportExtraction, FieldReportRepository, IntegrationEvent,
    ListItem, ListItemRepository, ListOwner, ListType, NewFieldReport, NewListItem, NewReminder,
    NewTask, RecordStore, Reminder, ReminderRepository, Site, SiteRepository, StructuredExtractor,
    Task, TaskExtraction, TaskQuery, TaskRepository, TaskStatusChange, TaskSyncService, User,
    UserRepository,
};

// ============================================
// Record store
// ============================================

#[derive(Default)]
pub struct InMemoryStore {
    pub tasks: Mutex<Vec<Task>>,
    pub reminders: Mutex<Vec<Reminder>>,
    pub field_reports: Mutex<Vec<FieldReport>>,
    pub list_items: Mutex<Vec<ListItem>>,
    pub sites: Mutex<Vec<Site>>,
    pub users: Mutex<Vec<User>>,
    writes: AtomicUsize,
    fail_task_insert: AtomicBool,
    fail_reminder_insert: AtomicBool,
    fail_report_insert: AtomicBool,
    fail_task_reads: AtomicBool,
    panic_on_task_reads: AtomicBool,
    failing_items: Mutex<HashSet<String>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record_store(self: &Arc<Self>) -> RecordStore {
        RecordStore {
            tasks: self.clone(),
            reminders: self.clone(),
            field_reports: self.clone(),
            list_items: self.clone(),
            sites: self.clone(),
            users: self.clone(),
        }
    }

    /// Successful inserts across every entity type
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_task_insert(&self) {
        self.fail_task_insert.store(true, Ordering::SeqCst);
    }

    pub fn fail_reminder_insert(&self) {
        self.fail_reminder_insert.store(true, Ordering::SeqCst);
    }

    pub fn fail_report_insert(&self) {
        self.fail_report_insert.store(true, Ordering::SeqCst);
    }

    pub fn fail_task_reads(&self) {
        self.fail_task_reads.store(true, Ordering::SeqCst);
    }

    pub fn panic_on_task_reads(&self) {
        self.panic_on_task_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_list_item(&self, name: &str) {
        self.failing_items.lock().unwrap().insert(name.to_string());
    }

    pub fn add_site(&self, name: &str, aliases: &[&str]) -> Site {
        let site = Site {
            id: Uuid::new_v4(),
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            location: None,
            is_active: true,
            sop_document_link: None,
            created_at: Utc::now(),
        };
        self.sites.lock().unwrap().push(site.clone());
        site
    }

    pub fn add_user(&self, first_name: &str, external_id: &str, site: Option<Uuid>) -> User {
        let user = User {
            id: Uuid::new_v4(),
            display_id: fieldline::DisplayIdPrefix::User.generate(),
            external_channel_id: Some(external_id.to_string()),
            username: Some(first_name.to_lowercase()),
            first_name: first_name.to_string(),
            last_name: String::new(),
            role: "technician".to_string(),
            primary_site_id: site,
            is_active: true,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    /// Store a task directly, bypassing failure injection
    pub fn seed_task(&self, task: NewTask) -> Task {
        let task = materialize_task(&task);
        self.tasks.lock().unwrap().push(task.clone());
        task
    }

    fn unavailable() -> DomainError {
        DomainError::Unavailable("connection refused".to_string())
    }
}

fn materialize_task(task: &NewTask) -> Task {
    let now = Utc::now();
    Task {
        id: Uuid::new_v4(),
        display_id: task.display_id.clone(),
        title: task.title.clone(),
        detailed_description: task.detailed_description.clone(),
        assignee_id: task.assignee_id,
        site_id: task.site_id,
        due_date: task.due_date,
        priority: task.priority,
        status: task.status,
        external_sync_id: task.external_sync_id.clone(),
        creator_id: task.creator_id,
        completion_date: None,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn insert(&self, task: &NewTask) -> Result<Task, DomainError> {
        if self.fail_task_insert.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let task = materialize_task(task);
        self.tasks.lock().unwrap().push(task.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(task)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, DomainError> {
        Ok(self.tasks.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn find_for_assignee(
        &self,
        assignee_id: Uuid,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, DomainError> {
        if self.panic_on_task_reads.load(Ordering::SeqCst) {
            panic!("task table exploded");
        }
        if self.fail_task_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks
            .iter()
            .rev()
            .filter(|t| t.assignee_id == assignee_id)
            .filter(|t| query.status.map_or(true, |s| t.status == s))
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        change: TaskStatusChange,
    ) -> Result<Option<Task>, DomainError> {
        let mut tasks = self.tasks.lock().unwrap();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.status = change.status;
        task.completion_date = change.completion_date;
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }
}

#[async_trait]
impl ReminderRepository for InMemoryStore {
    async fn insert(&self, reminder: &NewReminder) -> Result<Reminder, DomainError> {
        if self.fail_reminder_insert.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let reminder = Reminder {
            id: Uuid::new_v4(),
            title: reminder.title.clone(),
            fire_at: reminder.fire_at,
            owner_id: reminder.owner_id,
            related_task_id: reminder.related_task_id,
            related_site_id: reminder.related_site_id,
            status: reminder.status,
            channels: reminder.channels.clone(),
            created_at: Utc::now(),
        };
        self.reminders.lock().unwrap().push(reminder.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(reminder)
    }

    async fn find_for_task(&self, task_id: Uuid) -> Result<Vec<Reminder>, DomainError> {
        Ok(self
            .reminders
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.related_task_id == Some(task_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FieldReportRepository for InMemoryStore {
    async fn insert(&self, report: &NewFieldReport) -> Result<FieldReport, DomainError> {
        if self.fail_report_insert.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let report = FieldReport {
            id: Uuid::new_v4(),
            display_id: report.display_id.clone(),
            site_id: report.site_id,
            report_date: report.report_date,
            submitter_id: report.submitter_id,
            report_type: report.report_type,
            title_summary: report.title_summary.clone(),
            full_content: report.full_content.clone(),
            status: report.status,
            created_at: Utc::now(),
        };
        self.field_reports.lock().unwrap().push(report.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(report)
    }

    async fn find_recent_by_site(
        &self,
        site_id: Uuid,
        limit: usize,
    ) -> Result<Vec<FieldReport>, DomainError> {
        Ok(self
            .field_reports
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.site_id == Some(site_id))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_recent_by_submitter(
        &self,
        submitter_id: Uuid,
        limit: usize,
    ) -> Result<Vec<FieldReport>, DomainError> {
        Ok(self
            .field_reports
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.submitter_id == submitter_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ListItemRepository for InMemoryStore {
    async fn insert(&self, item: &NewListItem) -> Result<ListItem, DomainError> {
        if self.failing_items.lock().unwrap().contains(&item.item_name) {
            return Err(DomainError::Repository(format!(
                "rejected {}",
                item.item_name
            )));
        }
        let item = ListItem {
            id: Uuid::new_v4(),
            display_id: item.display_id.clone(),
            item_name: item.item_name.clone(),
            list_type: item.list_type,
            site_id: item.site_id,
            added_by: item.added_by,
            status: item.status,
            created_at: Utc::now(),
        };
        self.list_items.lock().unwrap().push(item.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(item)
    }

    async fn find_active(
        &self,
        owner: ListOwner,
        list_type: Option<ListType>,
    ) -> Result<Vec<ListItem>, DomainError> {
        Ok(self
            .list_items
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|i| match owner {
                ListOwner::Site(id) => i.site_id == Some(id),
                ListOwner::AddedBy(id) => i.added_by == id,
            })
            .filter(|i| list_type.map_or(true, |t| i.list_type == t))
            .filter(|i| i.status == fieldline::ListItemStatus::Active)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SiteRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Site>, DomainError> {
        Ok(self.sites.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_name_or_alias(&self, name: &str) -> Result<Option<Site>, DomainError> {
        let sites = self.sites.lock().unwrap();
        Ok(sites
            .iter()
            .find(|s| s.is_active && s.has_name(name))
            .or_else(|| sites.iter().find(|s| s.is_active && s.has_alias(name)))
            .cloned())
    }

    async fn list_active(&self) -> Result<Vec<Site>, DomainError> {
        let mut sites: Vec<Site> = self
            .sites
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.is_active)
            .cloned()
            .collect();
        sites.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sites)
    }

    async fn search(&self, query: &str) -> Result<Vec<Site>, DomainError> {
        let query = query.trim().to_lowercase();
        Ok(self
            .list_active()
            .await?
            .into_iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&query)
                    || s.aliases.iter().any(|a| a.to_lowercase().contains(&query))
                    || s
                        .location
                        .as_deref()
                        .is_some_and(|l| l.to_lowercase().contains(&query))
            })
            .collect())
    }

    async fn set_sop_link(&self, id: Uuid, link: &str) -> Result<Option<Site>, DomainError> {
        let mut sites = self.sites.lock().unwrap();
        let Some(site) = sites.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        site.sop_document_link = Some(link.to_string());
        Ok(Some(site.clone()))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_external_channel_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.is_active && u.external_channel_id.as_deref() == Some(external_id))
            .cloned())
    }
}

// ============================================
// Extraction
// ============================================

/// Returns canned results; unscripted modes fail with `Extraction`
#[derive(Default)]
pub struct ScriptedExtractor {
    classification: Option<Classification>,
    task: Option<TaskExtraction>,
    field_report: Option<FieldReportExtraction>,
    calls: AtomicUsize,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classifying(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn with_task(mut self, task: TaskExtraction) -> Self {
        self.task = Some(task);
        self
    }

    pub fn with_field_report(mut self, report: FieldReportExtraction) -> Self {
        self.field_report = Some(report);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StructuredExtractor for ScriptedExtractor {
    async fn extract(&self, _text: &str, mode: ExtractionMode) -> Result<Extraction, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = match mode {
            ExtractionMode::Classification => self.classification.map(Extraction::Classification),
            ExtractionMode::Task => self.task.clone().map(Extraction::Task),
            ExtractionMode::FieldReport => self.field_report.clone().map(Extraction::FieldReport),
        };
        scripted.ok_or_else(|| DomainError::Extraction(format!("no scripted {} result", mode)))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Sleeps past any sensible timeout, then fails
pub struct SlowExtractor {
    delay: Duration,
}

impl SlowExtractor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl StructuredExtractor for SlowExtractor {
    async fn extract(&self, _text: &str, _mode: ExtractionMode) -> Result<Extraction, DomainError> {
        tokio::time::sleep(self.delay).await;
        Err(DomainError::ExternalService("too slow".to_string()))
    }

    fn name(&self) -> &str {
        "slow"
    }
}

// ============================================
// Task sync
// ============================================

#[derive(Default)]
pub struct ScriptedTaskSync {
    created: Option<TaskExtraction>,
    refuse_completion: bool,
    fail_completion: bool,
    pub completed: Mutex<Vec<String>>,
}

impl ScriptedTaskSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn creating(mut self, task: TaskExtraction) -> Self {
        self.created = Some(task);
        self
    }

    pub fn refusing_completion(mut self) -> Self {
        self.refuse_completion = true;
        self
    }

    pub fn failing_completion(mut self) -> Self {
        self.fail_completion = true;
        self
    }
}

#[async_trait]
impl TaskSyncService for ScriptedTaskSync {
    async fn create_from_text(&self, _text: &str) -> Result<TaskExtraction, DomainError> {
        self.created
            .clone()
            .ok_or_else(|| DomainError::Extraction("task service rejected text".to_string()))
    }

    async fn complete(&self, external_id: &str) -> Result<bool, DomainError> {
        if self.fail_completion {
            return Err(DomainError::SyncMirror("task service down".to_string()));
        }
        self.completed.lock().unwrap().push(external_id.to_string());
        Ok(!self.refuse_completion)
    }

    fn name(&self) -> &str {
        "scripted-sync"
    }
}

// ============================================
// Document storage
// ============================================

#[derive(Default)]
pub struct FakeDocumentStorage {
    fail: bool,
}

impl FakeDocumentStorage {
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl DocumentStorage for FakeDocumentStorage {
    async fn create_site_sop(&self, site: &Site) -> Result<String, DomainError> {
        if self.fail {
            return Err(DomainError::ExternalService("drive unavailable".to_string()));
        }
        Ok(format!(
            "https://docs.google.com/document/d/{}/edit",
            site.name.to_lowercase()
        ))
    }
}

pub fn caller(site: Option<Uuid>) -> CallerContext {
    CallerContext::new(Uuid::new_v4(), "Dana Tech").with_primary_site(site)
}

// ============================================
// Chat transport
// ============================================

/// Records outbound messages; `handle_webhook` reads JSON-encoded
/// `IntegrationEvent`s so tests can drive any event shape
#[derive(Default)]
pub struct RecordingChat {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ChatIntegration for RecordingChat {
    async fn post_message(&self, channel_id: &str, content: &str) -> Result<(), DomainError> {
        self.sent
            .lock()
            .unwrap()
            .push((channel_id.to_string(), content.to_string()));
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }

    async fn handle_webhook(
        &self,
        payload: &[u8],
    ) -> Result<Option<IntegrationEvent>, DomainError> {
        serde_json::from_slice(payload)
            .map(Some)
            .map_err(|e| DomainError::Validation(e.to_string()))
    }
}
