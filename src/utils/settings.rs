//! Settings and configuration utilities.
//!
//! This module reads settings from $HOME/.git-ticket/settings.json and uses
//! them as a fallback for environment variables.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::ticket::ProviderId;

/// Environment variable naming the provider assumed for branches without a
/// remote.
pub const DEFAULT_PROVIDER_VAR: &str = "GIT_TICKET_DEFAULT_PROVIDER";

/// Settings loaded from $HOME/.git-ticket/settings.json.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Environment variable overrides.
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Provider assumed for branches without a remote.
    #[serde(default)]
    pub default_provider: Option<String>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".git-ticket").join("settings.json"))
    }

    /// Returns an environment variable with fallback to settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(_) => self.env.get(key).cloned(),
        }
    }

    /// Returns the provider assumed for branches without a remote.
    ///
    /// `GIT_TICKET_DEFAULT_PROVIDER` wins over `default_provider`; with
    /// neither set the built-in default applies.
    pub fn default_provider(&self) -> Result<ProviderId> {
        self.pick_default_provider(self.get_env_var(DEFAULT_PROVIDER_VAR))
    }

    fn pick_default_provider(&self, from_env: Option<String>) -> Result<ProviderId> {
        match from_env.or_else(|| self.default_provider.clone()) {
            Some(name) => ProviderId::parse(&name)
                .with_context(|| format!("Unknown default provider '{name}'")),
            None => Ok(ProviderId::Acronis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_settings(json: &str) -> anyhow::Result<(TempDir, PathBuf)> {
        let temp_dir = TempDir::new()?;
        let settings_path = temp_dir.path().join("settings.json");
        fs::write(&settings_path, json)?;
        Ok((temp_dir, settings_path))
    }

    #[test]
    fn settings_load_from_path() -> anyhow::Result<()> {
        let (_dir, path) = write_settings(
            r#"{
                "env": { "TEST_VAR": "test_value" },
                "default_provider": "github"
            }"#,
        )?;

        let settings = Settings::load_from_path(&path)?;

        assert_eq!(settings.env.get("TEST_VAR").map(String::as_str), Some("test_value"));
        assert_eq!(settings.default_provider.as_deref(), Some("github"));
        Ok(())
    }

    #[test]
    fn settings_missing_file_is_default() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let settings = Settings::load_from_path(temp_dir.path().join("absent.json"))?;

        assert!(settings.env.is_empty());
        assert!(settings.default_provider.is_none());
        Ok(())
    }

    #[test]
    fn settings_malformed_file_is_error() -> anyhow::Result<()> {
        let (_dir, path) = write_settings("{ not json")?;
        assert!(Settings::load_from_path(&path).is_err());
        Ok(())
    }

    #[test]
    fn settings_get_env_var_prefers_environment() {
        let settings = Settings {
            env: HashMap::from([
                ("GIT_TICKET_TEST_SETTINGS_VAR".to_string(), "from_settings".to_string()),
            ]),
            default_provider: None,
        };

        assert_eq!(
            settings.get_env_var("GIT_TICKET_TEST_SETTINGS_VAR").as_deref(),
            Some("from_settings")
        );

        env::set_var("GIT_TICKET_TEST_SETTINGS_VAR", "from_env");
        assert_eq!(
            settings.get_env_var("GIT_TICKET_TEST_SETTINGS_VAR").as_deref(),
            Some("from_env")
        );
        env::remove_var("GIT_TICKET_TEST_SETTINGS_VAR");
    }

    #[test]
    fn default_provider_precedence() -> anyhow::Result<()> {
        let settings = Settings {
            env: HashMap::new(),
            default_provider: Some("github".to_string()),
        };

        assert_eq!(settings.pick_default_provider(None)?, ProviderId::Github);
        assert_eq!(
            settings.pick_default_provider(Some("ACRONIS".to_string()))?,
            ProviderId::Acronis
        );
        assert_eq!(Settings::default().pick_default_provider(None)?, ProviderId::Acronis);
        Ok(())
    }

    #[test]
    fn default_provider_unknown_name_is_error() {
        let settings = Settings::default();
        assert!(settings
            .pick_default_provider(Some("gitlab".to_string()))
            .is_err());
    }
}
