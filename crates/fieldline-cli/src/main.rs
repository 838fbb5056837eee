//! Fieldline CLI - Talk to the field operations assistant
//!
//! Sends free text as a configured caller profile and lists tasks and sites.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Password};
use uuid::Uuid;

use api::FieldlineClient;
use config::{Config, Profile};

#[derive(Parser)]
#[command(name = "fieldline")]
#[command(about = "Fieldline CLI - Field operations assistant", long_about = None)]
#[command(version)]
struct Cli {
    /// Log HTTP activity (filter with RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
        /// Server URL (defaults to the configured one)
        #[arg(long)]
        url: Option<String>,
    },

    /// Manage caller profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Send free text as a caller
    Send {
        /// Message text (will prompt if not provided)
        text: Option<String>,
        /// Profile to use (overrides default)
        #[arg(short, long)]
        profile: Option<String>,
        /// Show intent, confidence and metadata
        #[arg(long)]
        details: bool,
    },

    /// List the caller's tasks
    Tasks {
        /// Status filter: "to do", "in progress", "completed"
        #[arg(short, long)]
        status: Option<String>,
        /// Max results
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Profile to use
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// List active sites
    Sites {
        /// Search by name, alias or location
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Add a new profile
    Add {
        /// Profile name (e.g., "dana")
        name: String,
        /// Caller's user ID
        #[arg(long)]
        user_id: Uuid,
        /// Display name
        #[arg(long)]
        display_name: Option<String>,
        /// Role (e.g., "technician")
        #[arg(long)]
        role: Option<String>,
        /// Primary site ID
        #[arg(long)]
        site_id: Option<Uuid>,
    },
    /// List all profiles
    List,
    /// Set default profile
    Set {
        /// Profile name to set as default
        name: String,
    },
    /// Remove a profile
    Remove {
        /// Profile name to remove
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine
    dotenvy::dotenv().ok();

    if cli.verbose {
        init_logging();
    }

    match cli.command {
        Commands::Login { key, url } => cmd_login(key, url).await,
        Commands::Profile { action } => cmd_profile(action),
        Commands::Send {
            text,
            profile,
            details,
        } => cmd_send(text, profile, details).await,
        Commands::Tasks {
            status,
            limit,
            profile,
        } => cmd_tasks(status, limit, profile).await,
        Commands::Sites { search } => cmd_sites(search).await,
        Commands::Config => cmd_config(),
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fieldline=debug")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>, url: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(url) = url {
        config.base_url = url;
    }

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    // Test connection
    let client = FieldlineClient::new(&config.base_url, Some(&api_key));
    print!("Testing connection... ");

    match (client.health().await, client.verify_key().await) {
        (Ok(true), Ok(true)) => {
            println!("{}", "OK".green());
        }
        (Ok(true), _) => {
            println!("{}", "Rejected".red());
            bail!("Fieldline API rejected the key.");
        }
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not connect to Fieldline API at {}", config.base_url);
        }
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);

    if config.profiles.is_empty() {
        println!("\n{}", "Tip: Set up a caller profile before sending text:".yellow());
        println!("  fieldline profile add dana --user-id <USER_ID> --display-name \"Dana Tech\"");
        println!("  fieldline profile set dana");
    }

    Ok(())
}

fn cmd_profile(action: ProfileAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ProfileAction::Add {
            name,
            user_id,
            display_name,
            role,
            site_id,
        } => {
            config.add_profile(
                name.clone(),
                Profile {
                    user_id,
                    name: display_name,
                    role,
                    primary_site_id: site_id,
                },
            );
            if config.default_profile.is_none() {
                config.set_default_profile(name.clone());
            }
            config.save()?;
            println!("{} Profile '{}' added", "✓".green(), name);
        }

        ProfileAction::List => {
            if config.profiles.is_empty() {
                println!("No profiles configured.");
                println!("\n{}", "Add one with:".dimmed());
                println!("  fieldline profile add <name> --user-id <USER_ID>");
                return Ok(());
            }

            println!("{}", "Profiles:".bold());
            for (name, profile) in &config.profiles {
                let is_default = config.default_profile.as_ref() == Some(name);
                let default_marker = if is_default {
                    " (default)".green().to_string()
                } else {
                    String::new()
                };

                println!(
                    "  {} {} [{}] ({}){}",
                    name.cyan(),
                    profile.name.as_deref().unwrap_or("-").dimmed(),
                    profile.role.as_deref().unwrap_or("-"),
                    short_id(profile.user_id),
                    default_marker
                );
            }
        }

        ProfileAction::Set { name } => {
            if config.set_default_profile(name.clone()) {
                config.save()?;
                println!("{} Default profile set to '{}'", "✓".green(), name);
            } else {
                bail!("Profile '{}' not found", name);
            }
        }

        ProfileAction::Remove { name } => {
            if config.remove_profile(&name) {
                config.save()?;
                println!("{} Profile '{}' removed", "✓".green(), name);
            } else {
                bail!("Profile '{}' not found", name);
            }
        }
    }

    Ok(())
}

fn active_profile<'a>(config: &'a Config, name: Option<&str>) -> Result<&'a Profile> {
    config.get_profile(name).context(
        "No profile specified and no default profile set. Use -p <profile> or set a default.",
    )
}

async fn cmd_send(text: Option<String>, profile: Option<String>, details: bool) -> Result<()> {
    let config = Config::load()?;
    let caller = active_profile(&config, profile.as_deref())?;
    let client = FieldlineClient::new(&config.base_url, config.api_key.as_deref());

    let text = match text {
        Some(t) => t,
        None => Input::new()
            .with_prompt("Message")
            .interact_text()
            .context("Failed to read input")?,
    };

    let resp = client.process(&text, caller).await?;

    let marker = match (resp.success, resp.action_taken.is_some()) {
        (true, true) => "✓".green(),
        (true, false) => "i".cyan(),
        (false, _) => "✗".red(),
    };
    println!("{} {}", marker, resp.response);

    if details {
        let confidence = resp
            .confidence
            .map(|c| format!("{:.2}", c))
            .unwrap_or_else(|| "-".to_string());
        eprintln!(
            "{} {} ({}) {}",
            "intent:".dimmed(),
            resp.intent.cyan(),
            confidence,
            resp.action_taken.as_deref().unwrap_or("").dimmed()
        );
        if !resp.metadata.is_null() {
            eprintln!("{}", serde_json::to_string_pretty(&resp.metadata)?.dimmed());
        }
    }

    if !resp.success {
        std::process::exit(1);
    }

    Ok(())
}

async fn cmd_tasks(status: Option<String>, limit: usize, profile: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let caller = active_profile(&config, profile.as_deref())?;
    let client = FieldlineClient::new(&config.base_url, config.api_key.as_deref());

    let tasks = client
        .list_tasks(caller.user_id, status.as_deref(), limit)
        .await?;

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    println!("{}", "Tasks:".bold());
    for task in tasks {
        let status = match task.status.as_str() {
            "Completed" => task.status.green(),
            "In Progress" => task.status.yellow(),
            _ => task.status.normal(),
        };
        let due = task
            .due_date
            .map(|d| format!(" due {}", d))
            .unwrap_or_default();

        println!(
            "  {} {} [{}] {}{}",
            task.display_id.dimmed(),
            truncate_string(&task.title, 60).cyan(),
            status,
            task.priority,
            due.dimmed()
        );
    }

    Ok(())
}

async fn cmd_sites(search: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let client = FieldlineClient::new(&config.base_url, config.api_key.as_deref());

    let sites = client.list_sites(search.as_deref()).await?;

    if sites.is_empty() {
        println!("No sites found.");
        return Ok(());
    }

    println!("{}", "Sites:".bold());
    for site in sites {
        let aliases = if site.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", site.aliases.join(", "))
        };
        let sop = if site.sop_document_link.is_some() {
            " SOP".green().to_string()
        } else {
            String::new()
        };

        println!(
            "  {} {}{} {}{}",
            short_id(site.id).dimmed(),
            site.name.cyan().bold(),
            aliases.dimmed(),
            site.location.as_deref().unwrap_or(""),
            sop
        );
    }

    Ok(())
}

fn short_id(id: Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  API Key: {}",
        if config.api_key.is_some() {
            "Set".green()
        } else {
            "Not set".red()
        }
    );
    println!(
        "  Default Profile: {}",
        config.default_profile.as_deref().unwrap_or("None").cyan()
    );
    println!("  Profiles: {}", config.profiles.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_string("Pump ✓ ok", 6), "Pump ✓...");
        assert_eq!(truncate_string("short", 10), "short");
    }

    #[test]
    fn test_send_parses_profile_flag() {
        let cli = Cli::try_parse_from(["fieldline", "send", "show my tasks", "-p", "dana"]).unwrap();
        match cli.command {
            Commands::Send { text, profile, .. } => {
                assert_eq!(text.as_deref(), Some("show my tasks"));
                assert_eq!(profile.as_deref(), Some("dana"));
            }
            _ => panic!("expected send"),
        }
    }
}
