//! Backend connection configuration

use serde::{Deserialize, Serialize};

/// Where the dashboard API lives and how to reach it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Origin of the control UI API (e.g., "http://raspberrypi.local:8080")
    pub base_url: String,
    /// Per-request timeout; unset means requests may hang indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
    /// Embedded monitoring panel (Grafana) probed once at startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_seconds: None,
            embed_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.timeout_seconds.is_none());
        assert!(config.embed_url.is_none());
    }

    #[test]
    fn test_backend_config_partial_toml() {
        let config: BackendConfig = toml::from_str("timeout_seconds = 10").unwrap();
        assert_eq!(config.timeout_seconds, Some(10));
        assert_eq!(config.base_url, "http://localhost:8080");
    }
}
