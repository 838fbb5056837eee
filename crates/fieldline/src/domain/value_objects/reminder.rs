//! Reminder value objects

use serde::{Deserialize, Serialize};

/// Delivery state of a reminder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderStatus {
    #[default]
    Scheduled,
    Sent,
    Cancelled,
}

impl std::fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderStatus::Scheduled => write!(f, "Scheduled"),
            ReminderStatus::Sent => write!(f, "Sent"),
            ReminderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::str::FromStr for ReminderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Scheduled" => Ok(ReminderStatus::Scheduled),
            "Sent" => Ok(ReminderStatus::Sent),
            "Cancelled" => Ok(ReminderStatus::Cancelled),
            _ => Err(format!("Unknown reminder status: {}", s)),
        }
    }
}

/// Channel a reminder is delivered through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryChannel {
    Telegram,
    Email,
}

impl std::fmt::Display for DeliveryChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryChannel::Telegram => write!(f, "telegram"),
            DeliveryChannel::Email => write!(f, "email"),
        }
    }
}

impl std::str::FromStr for DeliveryChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "telegram" => Ok(DeliveryChannel::Telegram),
            "email" => Ok(DeliveryChannel::Email),
            _ => Err(format!("Unknown delivery channel: {}", s)),
        }
    }
}
