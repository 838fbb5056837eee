//! Slash commands and reply texts
//!
//! Everything a technician reads in the chat lives here so the server
//! only decides *which* text to send.

use chrono::{DateTime, Utc};
use fieldline::{ResponseEnvelope, Task};

pub const HELP_MESSAGE: &str = "Fieldline Bot Help 🤖

Field Reports:
• \"Field report Site Alpha: Generator running at 80% load, fuel levels good\"
• \"Log incident at Site Beta: Noticed oil leak near pump 3\"

Tasks & Reminders:
• \"Remind me to call Anthony tomorrow at 2pm about the new controls\"
• \"Create task: Check generator maintenance schedule for next week\"

Lists & Inventory:
• \"Add WD-40 and rags to the Site Alpha shopping list\"
• \"Add backup hard drive to equipment inventory\"

Queries:
• \"What are my tasks for today?\"
• \"Show me the Site Beta shopping list\"
• \"Show recent reports\"

Commands:
• /start - Get started
• /help - Show this help
• /status - Check your account status

Just type naturally - I'll understand what you need! 💪";

pub const NOT_REGISTERED: &str = "❌ You're not registered in the Fieldline system. \
Please use /start and contact your administrator to get set up.";

pub const STATUS_NOT_REGISTERED: &str =
    "❌ You're not registered in the Fieldline system. Please contact your administrator.";

pub const STATUS_UNAVAILABLE: &str = "❌ Sorry, I couldn't retrieve your status information \
right now. Please try again later.";

pub const PROCESSING_FAILURE: &str = "❌ Sorry, something went wrong. Please try again in a moment.";

/// Commands the bot answers; anything else is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Status,
}

impl Command {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim_start_matches('/').to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "status" => Some(Command::Status),
            _ => None,
        }
    }
}

pub fn welcome_back(first_name: &str) -> String {
    format!(
        "Welcome back, {first_name}! 👋\n\n\
         I'm the Fieldline assistant. I can help you with:\n\n\
         📝 Create field reports\n\
         ✅ Manage tasks and reminders\n\
         📋 Update lists and inventories\n\
         🔍 Query your assignments\n\n\
         Just type what you need in natural language, and I'll help you out!"
    )
}

/// Greeting for a sender with no linked account; shows the id an
/// administrator needs to link them
pub fn welcome_unregistered(first_name: &str, telegram_id: &str) -> String {
    format!(
        "Hello {first_name}! 👋\n\n\
         I'm the Fieldline assistant, but I don't have you registered in our system yet.\n\n\
         Please contact your administrator to set up your account and link it to this Telegram ID: {telegram_id}\n\n\
         Once you're registered, I'll be able to help you with field reports, tasks, and more!"
    )
}

pub fn message_too_long(max_chars: usize) -> String {
    format!("❌ Message too long. Please keep messages under {max_chars} characters.")
}

/// Prefix the router's answer: ✅ something was recorded, ℹ️ read-only
/// success, ❌ failure
pub fn decorate_reply(envelope: &ResponseEnvelope) -> String {
    let prefix = match (envelope.success, envelope.action_taken.is_some()) {
        (true, true) => "✅",
        (true, false) => "ℹ️",
        (false, _) => "❌",
    };
    format!("{} {}", prefix, envelope.response)
}

/// `/status` reply
pub struct StatusCard<'a> {
    pub full_name: &'a str,
    pub role: &'a str,
    pub display_id: &'a str,
    pub primary_site: Option<&'a str>,
    pub recent_tasks: &'a [Task],
}

impl StatusCard<'_> {
    pub fn render(&self, now: DateTime<Utc>) -> String {
        let mut text = format!(
            "Your Fieldline Status 📊\n\nName: {}\nRole: {}\nUser ID: {}\n",
            self.full_name, self.role, self.display_id
        );

        if let Some(site) = self.primary_site {
            text.push_str(&format!("Primary Site: {}\n", site));
        }

        text.push_str("\nRecent Tasks:\n");
        if self.recent_tasks.is_empty() {
            text.push_str("No recent tasks found\n");
        }
        for task in self.recent_tasks {
            text.push_str(&format!("{} {}\n", task.status.glyph(), task.title));
        }

        text.push_str(&format!("\nLast updated: {}", now.format("%Y-%m-%d %H:%M")));
        text
    }
}
