//! Configuration management for the paymo-cli application.
//!
//! The configuration is a single YAML file at `~/.paymo/config.yaml` holding
//! the API key, the default timezone for timesheet entries, and the
//! operator-curated matter → project/task mapping. It is loaded once per
//! invocation and treated as immutable for the duration of a run.
//!
//! ## File format
//!
//! ```yaml
//! api_key: "secret"
//! timezone: America/Chicago
//! projects:
//!   "Smith v. Jones":
//!     project_id: 12345
//!     task_id: 67890
//! ```
//!
//! A missing file is not an error: `Config::read()` returns defaults so that
//! commands can still run and prompt for the API key interactively. The
//! `init` command drives the interactive wizard in [`Config::init`].

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_warning;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

/// Configuration file name inside the `~/.paymo` directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Timezone applied to entries that specify neither their own zone nor a
/// config-level default.
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

/// One curated mapping from a matter name to the Paymo project and task that
/// entries for that matter are booked against.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProjectMapping {
    pub project_id: i64,
    pub task_id: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    /// Paymo API key, used as the basic-auth username on every request.
    /// When absent, interactive commands prompt for it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default IANA timezone for localizing timesheet entry times.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Matter name → project/task mapping. Checked before any remote
    /// name search during resolution.
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectMapping>,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            timezone: default_timezone(),
            projects: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Reads the configuration from `~/.paymo/config.yaml`, falling back to
    /// defaults (and a console warning) when the file does not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME).map_err(|e| anyhow::anyhow!(e.to_string()))?;

        if !config_file_path.exists() {
            msg_warning!(Message::ConfigFileNotFound(config_file_path.display().to_string()));
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_yaml::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration back to `~/.paymo/config.yaml`.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        fs::write(config_file_path, serde_yaml::to_string(&self)?)?;
        Ok(())
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Prompts for the API key and default timezone, pre-filling existing
    /// values. The projects mapping is left to manual editing; the wizard
    /// only reports how many mappings are currently configured.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let api_key: String = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptApiKey.to_string())
            .allow_empty_password(config.api_key.is_some())
            .interact()?;
        if !api_key.is_empty() {
            config.api_key = Some(api_key);
        }

        config.timezone = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTimezone.to_string())
            .default(config.timezone.clone())
            .interact_text()?;

        Ok(config)
    }

    /// Returns the API key, prompting interactively when it is not
    /// configured. Used by CLI commands; the tool server refuses instead.
    pub fn require_api_key(&self) -> Result<String> {
        match &self.api_key {
            Some(key) => Ok(key.clone()),
            None => Ok(Password::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptApiKey.to_string())
                .interact()?),
        }
    }

    /// Looks up the operator-curated mapping for a matter name.
    pub fn mapping_for(&self, matter: &str) -> Option<&ProjectMapping> {
        self.projects.get(matter)
    }
}
