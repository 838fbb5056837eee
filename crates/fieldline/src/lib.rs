//! Fieldline Domain Library
//!
//! Core domain types and interfaces for the Fieldline command router,
//! which turns free-text messages from field technicians into tasks,
//! reminders, field reports and list entries.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Task, Reminder, FieldReport, ListItem, Site, User)
//!   - `value_objects/`: Immutable value types (Intent, Priority, TaskStatus, ReportType)
//!   - `services/`: Pure text heuristics (pattern classifier, list/status parsing)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces (language model, extraction, task sync)
//!   - `integration`: Chat platform interface
//!
//! # Usage
//!
//! ```rust,ignore
//! use fieldline::domain::{Intent, Task};
//! use fieldline::ports::{StructuredExtractor, TaskRepository};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ActionTaken, CallerContext, Classification, DeliveryChannel, DisplayIdPrefix, DomainError,
    ErrorKind, Extraction, ExtractionMode, FieldReport, FieldReportExtraction, Intent, ListItem,
    ListItemStatus, ListType, NewFieldReport, NewListItem, NewReminder, NewTask, Priority,
    Reminder, ReminderStatus, ReportStatus, ReportType, ResponseEnvelope, Site, Task,
    TaskExtraction, TaskStatus, TaskStatusChange, User,
};
pub use ports::{
    // Chat transport
    ChatIntegration,
    // Language model
    ChatMessage,
    CompletionOptions,
    CompletionResponse,
    // External services
    DocumentStorage,
    // Repositories
    FieldReportRepository,
    IntegrationEvent,
    ListItemRepository,
    ListOwner,
    LlmProvider,
    MessageRole,
    RecordStore,
    ReminderRepository,
    SiteRepository,
    StructuredExtractor,
    TaskQuery,
    TaskRepository,
    TaskSyncService,
    TokenUsage,
    UserRepository,
};
