//! Telegram Integration for Fieldline
//!
//! Chat transport for field technicians: parses webhook updates into
//! [`fieldline::IntegrationEvent`]s, delivers replies through the Bot API
//! and owns the slash-command texts.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fieldline_integration_telegram::{TelegramConfig, TelegramIntegration};
//!
//! let config = TelegramConfig::new("123:bot-token").with_webhook_secret("s3cret");
//! let integration = TelegramIntegration::new(config);
//! ```

pub mod commands;
mod client;
mod config;
mod integration;
mod webhook;

pub use client::TelegramClient;
pub use commands::{Command, StatusCard};
pub use config::TelegramConfig;
pub use integration::TelegramIntegration;
pub use webhook::{TelegramWebhookHandler, SECRET_TOKEN_HEADER};
