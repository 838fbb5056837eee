//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    CompleteTaskResponse,
    // Task models
    CreateTaskRequest,
    // Field report models
    CreateFieldReportRequest,
    FieldReportResponse,
    // NLP models
    ProcessRequest,
    ProcessResponse,
    // Site models
    SiteResponse,
    SopResponse,
    TaskResponse,
    UserContext,
};

// Local route types
use super::health::DatabaseHealth;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        super::health::database_health,
        // NLP endpoints
        super::nlp::process,
        // Task endpoints
        super::tasks::create_task,
        super::tasks::list_user_tasks,
        super::tasks::complete_task,
        // Field report endpoints
        super::field_reports::create_field_report,
        super::field_reports::list_site_reports,
        // Site endpoints
        super::sites::list_sites,
        super::sites::search_sites,
        super::sites::create_site_sop,
    ),
    info(
        title = "Fieldline API",
        version = "0.1.0",
        description = "Field operations assistant API\n\nRoutes technicians' free-text messages to tasks, reminders, field reports and lists, with structured endpoints alongside.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "NLP", description = "NLP - Free-text intent routing"),
        (name = "Tasks", description = "Tasks - Creation, listing and completion"),
        (name = "Field Reports", description = "Field Reports - Verbatim site narratives"),
        (name = "Sites", description = "Sites - Lookup and SOP documents"),
    ),
    components(
        schemas(
            DatabaseHealth,
            // NLP
            UserContext,
            ProcessRequest,
            ProcessResponse,
            // Tasks
            CreateTaskRequest,
            TaskResponse,
            CompleteTaskResponse,
            // Field reports
            CreateFieldReportRequest,
            FieldReportResponse,
            // Sites
            SiteResponse,
            SopResponse,
        )
    ),
)]
pub struct ApiDoc;
