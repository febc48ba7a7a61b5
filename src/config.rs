//! Configuration loading and management
//!
//! Handles parsing of the optional `habit.toml` in the data directory.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::streaks::{DEFAULT_DISPLAY_THRESHOLD, DEFAULT_HIGHLIGHT_THRESHOLD};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Streak display configuration
    #[serde(default)]
    pub streaks: StreaksConfig,

    /// Progress chart configuration
    #[serde(default)]
    pub progress: ProgressConfig,
}

/// Streak-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreaksConfig {
    /// Minimum streak listed as active
    #[serde(default = "default_display_threshold")]
    pub display_threshold: u32,

    /// Streaks above this are highlighted in the checklist
    #[serde(default = "default_highlight_threshold")]
    pub highlight_threshold: u32,
}

fn default_display_threshold() -> u32 {
    DEFAULT_DISPLAY_THRESHOLD
}

fn default_highlight_threshold() -> u32 {
    DEFAULT_HIGHLIGHT_THRESHOLD
}

impl Default for StreaksConfig {
    fn default() -> Self {
        Self {
            display_threshold: default_display_threshold(),
            highlight_threshold: default_highlight_threshold(),
        }
    }
}

/// Progress chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Width of the longest bar in the text chart
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_chart_width() -> usize {
    40
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            chart_width: default_chart_width(),
        }
    }
}

impl Config {
    /// Load configuration from a `habit.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the data directory, or return defaults
    pub fn load_from_dir(data_dir: &Path) -> Self {
        let config_path = data_dir.join(crate::storage::CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %config_path.display(), "ignoring config: {err}");
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.streaks.display_threshold == 0 {
            return Err(Error::InvalidConfig(
                "streaks.display_threshold must be >= 1".to_string(),
            ));
        }
        if self.streaks.highlight_threshold < self.streaks.display_threshold {
            return Err(Error::InvalidConfig(
                "streaks.highlight_threshold must be >= streaks.display_threshold".to_string(),
            ));
        }
        if self.progress.chart_width == 0 {
            return Err(Error::InvalidConfig(
                "progress.chart_width must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
