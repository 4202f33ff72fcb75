//! Configuration module for the tracker dashboard
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`DASHBOARD_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use dashboard::config::DashboardConfig;
//!
//! let config = DashboardConfig::default();
//! assert_eq!(config.polling.interval_ms, 3000);
//!
//! let toml = r#"
//! [backend]
//! base_url = "http://raspberrypi.local:8080"
//! "#;
//! let config: DashboardConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.backend.base_url, "http://raspberrypi.local:8080");
//! ```

pub mod backend;
pub mod controls;
pub mod error;
pub mod logging;
pub mod polling;

pub use backend::BackendConfig;
pub use controls::{default_presets, find_preset, ControlsConfig, PresetConfig, SliderConfig};
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use polling::PollingConfig;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Unified configuration for the dashboard client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub backend: BackendConfig,
    pub polling: PollingConfig,
    pub controls: ControlsConfig,
    pub presets: Vec<PresetConfig>,
    pub logging: LoggingConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            polling: PollingConfig::default(),
            controls: ControlsConfig::default(),
            presets: default_presets(),
            logging: LoggingConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                Ok(toml::from_str(&content)?)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load the file when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(Some(path))
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (the current value is kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("DASHBOARD_URL") {
            self.backend.base_url = url;
        }
        if let Ok(interval) = std::env::var("DASHBOARD_POLL_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.polling.interval_ms = ms;
            }
        }
        if let Ok(level) = std::env::var("DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DASHBOARD_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::invalid("backend.base_url", "URL cannot be empty"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::invalid(
                "backend.base_url",
                "URL must start with http:// or https://",
            ));
        }

        if self.polling.interval_ms == 0 {
            return Err(ConfigError::invalid(
                "polling.interval_ms",
                "interval must be non-zero",
            ));
        }

        for (axis, slider) in [("x", &self.controls.x), ("y", &self.controls.y)] {
            if slider.min > slider.max {
                return Err(ConfigError::invalid(
                    format!("controls.{}", axis),
                    format!("min ({}) exceeds max ({})", slider.min, slider.max),
                ));
            }
        }

        let mut seen = HashSet::new();
        for (i, preset) in self.presets.iter().enumerate() {
            if preset.name.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("presets[{}].name", i),
                    "name cannot be empty",
                ));
            }
            if !seen.insert(preset.name.to_lowercase()) {
                return Err(ConfigError::invalid(
                    format!("presets[{}].name", i),
                    format!("duplicate preset '{}'", preset.name),
                ));
            }
        }

        Ok(())
    }
}
