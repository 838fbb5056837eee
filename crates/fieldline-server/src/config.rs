//! Server settings
//!
//! Built from a key lookup so the shuttle `SecretStore` and a plain map
//! in tests go through the same parsing. Blank values count as unset.

use std::str::FromStr;
use std::time::Duration;

use fieldline::DomainError;
use fieldline_integration_telegram::TelegramConfig;
use uuid::Uuid;

use crate::adapters::google_drive::GoogleCredentials;
use crate::adapters::openai;
use crate::application::orchestrator::DEFAULT_CONFIDENCE_THRESHOLD;

pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 2000;
pub const DEFAULT_EXTERNAL_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub openai: Option<OpenAiSettings>,
    pub todoist_token: Option<String>,
    pub google: Option<GoogleCredentials>,
    pub sop_share_domain: Option<String>,
    pub telegram: Option<TelegramConfig>,
    pub max_message_length: usize,
    pub confidence_threshold: f32,
    pub external_timeout: Duration,
    pub default_site_id: Option<Uuid>,
}

impl Settings {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai = match get("OPENAI_API_KEY") {
            Some(api_key) => Some(OpenAiSettings {
                api_key,
                model: get("OPENAI_MODEL").unwrap_or_else(|| openai::DEFAULT_MODEL.to_string()),
                base_url: get("OPENAI_BASE_URL")
                    .unwrap_or_else(|| openai::DEFAULT_BASE_URL.to_string()),
                max_tokens: parse_or(&get, "OPENAI_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            }),
            None => None,
        };

        let google = match (
            get("GOOGLE_CLIENT_ID"),
            get("GOOGLE_CLIENT_SECRET"),
            get("GOOGLE_REFRESH_TOKEN"),
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => {
                Some(GoogleCredentials {
                    client_id,
                    client_secret,
                    refresh_token,
                })
            }
            _ => None,
        };

        let telegram = get("TELEGRAM_BOT_TOKEN").map(|token| {
            let config = TelegramConfig::new(token);
            match get("TELEGRAM_WEBHOOK_SECRET") {
                Some(secret) => config.with_webhook_secret(secret),
                None => config,
            }
        });

        let confidence_threshold =
            parse_or(&get, "NLP_CONFIDENCE_THRESHOLD", DEFAULT_CONFIDENCE_THRESHOLD)?;
        if !(0.0..=1.0).contains(&confidence_threshold) {
            return Err(DomainError::Validation(format!(
                "NLP_CONFIDENCE_THRESHOLD must be between 0 and 1, got {}",
                confidence_threshold
            )));
        }

        let max_message_length =
            parse_or(&get, "MAX_MESSAGE_LENGTH", DEFAULT_MAX_MESSAGE_LENGTH)?;
        if max_message_length == 0 {
            return Err(DomainError::Validation(
                "MAX_MESSAGE_LENGTH must be positive".to_string(),
            ));
        }

        Ok(Self {
            api_key: get("FIELDLINE_API_KEY"),
            openai,
            todoist_token: get("TODOIST_API_TOKEN"),
            google,
            sop_share_domain: get("SOP_SHARE_DOMAIN"),
            telegram,
            max_message_length,
            confidence_threshold,
            external_timeout: Duration::from_secs(parse_or(
                &get,
                "EXTERNAL_TIMEOUT_SECS",
                DEFAULT_EXTERNAL_TIMEOUT_SECS,
            )?),
            default_site_id: get("DEFAULT_SITE_ID")
                .map(|raw| parse_value::<Uuid>("DEFAULT_SITE_ID", &raw))
                .transpose()?,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| DomainError::Validation(format!("Invalid {}='{}': {}", key, raw, e)))
}
