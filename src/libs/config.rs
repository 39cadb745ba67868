//! Configuration management for taskdeck.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). A missing file is not an error: every field has a
//! default that matches the stock local setup, where the store listens on
//! `127.0.0.1:8000` and the terminal client talks to the same address.
//!
//! Environment variables override the file, which makes ad-hoc runs and
//! tests easy without touching the saved configuration:
//!
//! - `TASKDECK_BIND_ADDR` – socket address for `taskdeck serve`
//! - `TASKDECK_BASE_URL` – base URL for `taskdeck tui`
//! - `TASKDECK_DATABASE` – path of the SQLite database file
//!
//! A `.env` file in the working directory is loaded before these are read.
//!
//! ```rust,no_run
//! use taskdeck::libs::config::Config;
//!
//! let settings = Config::read()?.server_settings();
//! println!("connecting to {}", settings.base_url);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_DB_FILE_NAME: &str = "task.db";

pub const ENV_BIND_ADDR: &str = "TASKDECK_BIND_ADDR";
pub const ENV_BASE_URL: &str = "TASKDECK_BASE_URL";
pub const ENV_DATABASE: &str = "TASKDECK_DATABASE";

/// Connection settings shared by the store service and the terminal client.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Socket address the task store binds to.
    pub bind_addr: String,

    /// Base URL the terminal client sends requests to.
    pub base_url: String,

    /// SQLite database file. Relative paths and `None` resolve inside the
    /// data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            database: None,
        }
    }
}

impl ServerConfig {
    /// Applies overrides from `lookup`, normally [`std::env::var`].
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = v;
        }
        if let Some(v) = lookup(ENV_BASE_URL) {
            self.base_url = v;
        }
        if let Some(v) = lookup(ENV_DATABASE) {
            self.database = Some(v);
        }
        self
    }

    /// Absolute location of the database file.
    pub fn database_path(&self, storage: &DataStorage) -> Result<PathBuf> {
        match self.database.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) if Path::new(path).is_absolute() => Ok(PathBuf::from(path)),
            Some(path) => Ok(storage.get_path(path)?),
            None => Ok(storage.get_path(DEFAULT_DB_FILE_NAME)?),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

impl Config {
    /// Loads the configuration from the data directory, or defaults when absent.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the saved configuration. Returns `false` when there was none.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Effective server settings: file values, then environment overrides.
    pub fn server_settings(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Interactive setup wizard, seeded with the currently saved values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.server.clone().unwrap_or_default();

        msg_print!(Message::ConfigModuleServer);

        let bind_addr: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptBindAddr.to_string())
            .default(default.bind_addr)
            .interact_text()?;

        let base_url: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptBaseUrl.to_string())
            .default(default.base_url)
            .interact_text()?;

        let database: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDatabasePath.to_string())
            .default(default.database.unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        config.server = Some(ServerConfig {
            bind_addr,
            base_url,
            database: Some(database).filter(|d| !d.trim().is_empty()),
        });

        Ok(config)
    }
}
