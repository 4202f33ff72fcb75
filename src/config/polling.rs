//! Polling and timer configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timer settings for sensor polling and deferred view updates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Milliseconds between sensor polls
    pub interval_ms: u64,
    /// Delay before the sensor refresh that follows a control action
    pub refresh_delay_ms: u64,
    /// Time the embed placeholder spends fading before it is hidden
    pub placeholder_fade_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            refresh_delay_ms: 500,
            placeholder_fade_ms: 500,
        }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn placeholder_fade(&self) -> Duration {
        Duration::from_millis(self.placeholder_fade_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polling_config_defaults() {
        let config = PollingConfig::default();
        assert_eq!(config.interval(), Duration::from_secs(3));
        assert_eq!(config.refresh_delay(), Duration::from_millis(500));
        assert_eq!(config.placeholder_fade(), Duration::from_millis(500));
    }
}
