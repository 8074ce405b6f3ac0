//! Issue tracker configuration types and loading

use chrono::format::{Item, StrftimeItems};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::planning::DEFAULT_AVERAGE_STORY_POINTS;

/// Environment variable overriding `planning.average-story-points`
pub const AVERAGE_STORY_POINTS_ENV: &str = "ISSUETRACKER_AVERAGE_STORY_POINTS";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Planning parameters
    pub planning: PlanningConfig,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Output formatting
    pub output: OutputConfig,
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        if self.planning.average_story_points == 0 {
            return Err(eyre::eyre!("planning.average-story-points must be greater than zero"));
        }
        if StrftimeItems::new(&self.output.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(eyre::eyre!(
                "output.date-format is not a valid strftime format: '{}'",
                self.output.date_format
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file_chain(config_path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Read just the log level, before logging is set up
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load_file_chain(config_path).ok().and_then(|c| c.log_level)
    }

    fn load_file_chain(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .issuetracker.yml
        let local_config = PathBuf::from(".issuetracker.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/issuetracker/issuetracker.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("issuetracker").join("issuetracker.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var(AVERAGE_STORY_POINTS_ENV) {
            self.planning.average_story_points = value
                .trim()
                .parse()
                .context(format!("{} must be a positive integer, got '{}'", AVERAGE_STORY_POINTS_ENV, value))?;
            tracing::info!(
                average_story_points = self.planning.average_story_points,
                "Average story points overridden from environment"
            );
        }
        Ok(())
    }
}

/// Planning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Points one developer completes per week
    #[serde(rename = "average-story-points")]
    pub average_story_points: u32,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            average_story_points: DEFAULT_AVERAGE_STORY_POINTS,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file
    #[serde(rename = "db-path")]
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        // Use XDG data directory (~/.local/share/issuetracker on Linux)
        let db_path = dirs::data_dir()
            .map(|d| d.join("issuetracker"))
            .unwrap_or_else(|| PathBuf::from(".issuetracker"))
            .join("issuetracker.db");

        Self { db_path }
    }
}

/// Output formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// chrono format string for creation dates
    #[serde(rename = "date-format")]
    pub date_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}
