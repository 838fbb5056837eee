//! Configuration management for Fieldline CLI
//!
//! Stores API key, caller profiles, and default settings in
//! ~/.config/fieldline/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

const CONFIG_DIR: &str = "fieldline";
const CONFIG_FILE: &str = "config.toml";

/// Environment overrides, read after `.env` is loaded
const ENV_API_KEY: &str = "FIELDLINE_API_KEY";
const ENV_BASE_URL: &str = "FIELDLINE_BASE_URL";

/// Caller identity sent with free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_site_id: Option<Uuid>,
}

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_profile: None,
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file (or defaults), then apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.is_empty()) {
            self.base_url = url;
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Set API key
    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    /// Add or replace a profile
    pub fn add_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile, clearing the default when it pointed there
    pub fn remove_profile(&mut self, name: &str) -> bool {
        let removed = self.profiles.remove(name).is_some();
        if removed && self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        removed
    }

    /// Set default profile
    pub fn set_default_profile(&mut self, name: String) -> bool {
        if self.profiles.contains_key(&name) {
            self.default_profile = Some(name);
            true
        } else {
            false
        }
    }

    /// Get the active profile (specified or default)
    pub fn get_profile(&self, name: Option<&str>) -> Option<&Profile> {
        let profile_name = name.or(self.default_profile.as_deref())?;
        self.profiles.get(profile_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            user_id: Uuid::new_v4(),
            name: Some("Dana Tech".to_string()),
            role: Some("technician".to_string()),
            primary_site_id: None,
        }
    }

    #[test]
    fn test_profile_selection() {
        let mut config = Config::default();
        let dana = profile();
        config.add_profile("dana".to_string(), dana.clone());

        assert!(config.get_profile(None).is_none());
        assert!(config.set_default_profile("dana".to_string()));
        assert_eq!(config.get_profile(None), Some(&dana));
        assert!(!config.set_default_profile("missing".to_string()));
    }

    #[test]
    fn test_removing_default_clears_it() {
        let mut config = Config::default();
        config.add_profile("dana".to_string(), profile());
        config.set_default_profile("dana".to_string());

        assert!(config.remove_profile("dana"));
        assert!(config.default_profile.is_none());
        assert!(!config.remove_profile("dana"));
    }

    #[test]
    fn test_toml_round_trip_keeps_profiles() {
        let mut config = Config::default();
        config.add_profile("dana".to_string(), profile());
        config.set_default_profile("dana".to_string());

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();

        assert_eq!(parsed.profiles, config.profiles);
        assert_eq!(parsed.default_profile.as_deref(), Some("dana"));
    }

    #[test]
    fn test_missing_base_url_uses_default() {
        let parsed = Config::parse("api_key = \"k\"").unwrap();
        assert_eq!(parsed.base_url, default_base_url());
        assert_eq!(parsed.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_environment_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            ENV_API_KEY => Some("from-env".to_string()),
            ENV_BASE_URL => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.base_url, default_base_url());
    }
}
