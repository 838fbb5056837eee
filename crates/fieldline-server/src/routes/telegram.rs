//! Telegram Webhook Route
//!
//! Authenticated by the shared secret header rather than the API key.
//! Updates are answered in the background so Telegram always gets a
//! prompt 200 and never redelivers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use fieldline_integration_telegram::{TelegramConfig, SECRET_TOKEN_HEADER};

use crate::application::ChatService;
use crate::AppState;

/// Chat transport wiring, present only when a bot token is configured
#[derive(Clone)]
pub struct TelegramWebhook {
    pub chat: Arc<ChatService>,
    pub config: TelegramConfig,
}

pub async fn telegram_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let Some(telegram) = state.telegram else {
        return StatusCode::NOT_FOUND;
    };

    let secret = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    if !telegram.config.verify_secret(secret) {
        tracing::warn!("Telegram webhook secret mismatch");
        return StatusCode::UNAUTHORIZED;
    }

    tokio::spawn(async move {
        if let Err(e) = telegram.chat.handle_update(&body).await {
            tracing::error!(error = %e, "Failed to process Telegram update");
        }
    });

    StatusCode::OK
}

pub fn router() -> Router<AppState> {
    Router::new().route("/telegram/webhook", post(telegram_webhook))
}
