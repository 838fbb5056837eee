use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use fieldline::{DocumentStorage, StructuredExtractor, TaskSyncService};
use fieldline_integration_telegram::TelegramIntegration;

mod adapters;
mod application;
mod auth;
mod config;
mod models;
mod routes;

use adapters::{GoogleDriveStorage, LlmExtractor, OpenAiProvider, TodoistClient};
use application::{
    BoundedDocumentStorage, BoundedExtractor, BoundedTaskSync, ChatService, ExtractionRouter,
    IntentClassifier, Orchestrator, ReportService, SiteService, TaskService,
};
use auth::ApiKey;
use config::Settings;
use routes::telegram::TelegramWebhook;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub orchestrator: Arc<Orchestrator>,
    pub task_service: Arc<TaskService>,
    pub report_service: Arc<ReportService>,
    pub site_service: Arc<SiteService>,
    pub telegram: Option<TelegramWebhook>,
    /// Site assumed for callers without a primary site
    pub default_site_id: Option<Uuid>,
    pub max_message_length: usize,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Fieldline API is running - reports flow in from the field".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🛠️  Fieldline API initializing...");

    let settings = Settings::from_lookup(|key| secrets.get(key))
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let api_key = ApiKey::new(settings.api_key.clone());
    if api_key.is_enabled() {
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No FIELDLINE_API_KEY set - authentication disabled");
    }

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| anyhow::Error::new(e).context("Failed to run database migrations"))?;

    tracing::info!("✅ Database migrations completed");

    let store = adapters::postgres::record_store(&pool);
    let timeout = settings.external_timeout;

    // Language model, bounded by the external call timeout
    let llm: Option<Arc<dyn StructuredExtractor>> = match &settings.openai {
        Some(openai) => {
            let provider = OpenAiProvider::new(openai.api_key.clone())
                .with_model(openai.model.clone())
                .with_base_url(openai.base_url.clone());
            let extractor =
                LlmExtractor::new(Arc::new(provider)).with_max_tokens(openai.max_tokens);
            tracing::info!("🧠 Language model initialized ({})", openai.model);
            Some(Arc::new(BoundedExtractor::new(Arc::new(extractor), timeout)))
        }
        None => {
            tracing::warn!("⚠️  No OPENAI_API_KEY set - classification uses patterns only");
            None
        }
    };

    let task_sync: Option<Arc<dyn TaskSyncService>> = match &settings.todoist_token {
        Some(token) => {
            tracing::info!("📋 Todoist sync enabled");
            Some(Arc::new(BoundedTaskSync::new(
                Arc::new(TodoistClient::new(token.clone())),
                timeout,
            )))
        }
        None => {
            tracing::warn!("⚠️  No TODOIST_API_TOKEN set - task mirroring disabled");
            None
        }
    };

    let documents: Option<Arc<dyn DocumentStorage>> = match &settings.google {
        Some(credentials) => {
            tracing::info!("📄 Google Drive SOP storage enabled");
            let drive = GoogleDriveStorage::new(credentials.clone())
                .with_share_domain(settings.sop_share_domain.clone());
            Some(Arc::new(BoundedDocumentStorage::new(Arc::new(drive), timeout)))
        }
        None => {
            tracing::warn!("⚠️  No Google credentials set - SOP creation disabled");
            None
        }
    };

    let extractor = Arc::new(ExtractionRouter::new(llm.clone(), task_sync.clone()));
    let orchestrator = Arc::new(
        Orchestrator::new(
            IntentClassifier::new(llm),
            store.clone(),
            extractor,
            task_sync.clone(),
        )
        .with_confidence_threshold(settings.confidence_threshold),
    );

    let telegram = settings.telegram.clone().map(|config| {
        tracing::info!("💬 Telegram webhook enabled at /telegram/webhook");
        if config.webhook_secret.is_none() {
            tracing::warn!("⚠️  No TELEGRAM_WEBHOOK_SECRET set - webhook is unauthenticated");
        }
        let chat = ChatService::new(
            orchestrator.clone(),
            store.clone(),
            Arc::new(TelegramIntegration::new(config.clone())),
            settings.max_message_length,
        );
        TelegramWebhook {
            chat: Arc::new(chat),
            config,
        }
    });

    // Create application state
    let state = AppState {
        pool,
        orchestrator,
        task_service: Arc::new(TaskService::new(store.clone(), task_sync)),
        report_service: Arc::new(ReportService::new(store.clone())),
        site_service: Arc::new(SiteService::new(store, documents)),
        telegram,
        default_site_id: settings.default_site_id,
        max_message_length: settings.max_message_length,
    };

    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .merge(routes::nlp::router())
        .merge(routes::tasks::router())
        .merge(routes::field_reports::router())
        .merge(routes::sites::router())
        .merge(routes::health::router())
        .layer(middleware::from_fn_with_state(api_key, auth::auth_middleware));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    // Build router with shared state
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::telegram::router())
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Fieldline API ready");

    Ok(router.into())
}
