use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "padlink.json";

/// Bounds for the event channel capacity.
const EVENT_CAPACITY_RANGE: (usize, usize) = (1, 65536);

/// Launchpad session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchpadConfig {
    /// Substring matched against MIDI port names when no port is given
    pub device_name: String,
    /// Client name registered with the system MIDI service
    pub client_name: String,
    /// Explicit port index, overrides name matching
    pub port: Option<usize>,
    /// Connect as soon as the session is created
    pub autostart: bool,
    /// Buffered events per subscriber before the slowest one lags
    pub event_capacity: usize,
}

impl Default for LaunchpadConfig {
    fn default() -> Self {
        Self {
            device_name: "Launchpad".to_string(),
            client_name: "padlink".to_string(),
            port: None,
            autostart: true,
            event_capacity: 256,
        }
    }
}

/// Persisted configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    pub config: LaunchpadConfig,
    pub created_at: String,
    pub modified_at: String,
}

/// Loads and saves [`LaunchpadConfig`] as JSON.
pub struct ConfigManager {
    config_path: PathBuf,
    config: LaunchpadConfig,
    created_at: Option<String>,
}

impl ConfigManager {
    /// Create a new configuration manager.
    /// Defaults to `padlink.json` in the current working directory.
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let config_path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self {
            config_path,
            config: LaunchpadConfig::default(),
            created_at: None,
        }
    }

    /// Load the config file, writing the defaults first if it doesn't exist.
    pub fn load(&mut self) -> Result<LaunchpadConfig, ConfigError> {
        if !self.config_path.exists() {
            self.save()?;
            return Ok(self.config.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ConfigError::Read(e.to_string()))?;

        let config_file: ConfigFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if config_file.version != env!("CARGO_PKG_VERSION") {
            tracing::warn!(
                "Config file version {} doesn't match {}, missing settings use defaults",
                config_file.version,
                env!("CARGO_PKG_VERSION")
            );
        }

        Self::validate(&config_file.config).map_err(ConfigError::Validation)?;

        self.config = config_file.config;
        self.created_at = Some(config_file.created_at);
        Ok(self.config.clone())
    }

    /// Write the current config to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            if parent != Path::new("") && parent != Path::new(".") {
                fs::create_dir_all(parent).map_err(|e| ConfigError::Write(e.to_string()))?;
            }
        }

        let now = chrono::Utc::now().to_rfc3339();
        let config_file = ConfigFile {
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: self.config.clone(),
            created_at: self.created_at.clone().unwrap_or_else(|| now.clone()),
            modified_at: now,
        };

        let content = serde_json::to_string_pretty(&config_file)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(&self.config_path, content).map_err(|e| ConfigError::Write(e.to_string()))?;

        Ok(())
    }

    /// Validate, replace and save the config.
    pub fn update(&mut self, config: LaunchpadConfig) -> Result<(), ConfigError> {
        Self::validate(&config).map_err(ConfigError::Validation)?;
        self.config = config;
        self.save()
    }

    pub fn config(&self) -> &LaunchpadConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Check every setting, collecting all problems.
    pub fn validate(config: &LaunchpadConfig) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if config.device_name.is_empty() && config.port.is_none() {
            errors.push("device_name must not be empty when no port is set".to_string());
        }

        if config.client_name.is_empty() {
            errors.push("client_name must not be empty".to_string());
        }

        let (min, max) = EVENT_CAPACITY_RANGE;
        if config.event_capacity < min || config.event_capacity > max {
            errors.push(format!("event_capacity must be between {} and {}", min, max));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Failed to write config file: {0}")]
    Write(String),

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Config validation errors: {}", .0.join(", "))]
    Validation(Vec<String>),
}
