//! Diagnostic logging setup
//!
//! The dashboard reports swallowed failures (health check, sensor polls)
//! through `tracing`; this module wires the subscriber from
//! [`LoggingConfig`](crate::config::LoggingConfig).

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build filter directives string from LoggingConfig
///
/// # Examples
///
/// ```
/// use dashboard::config::{LogFormat, LoggingConfig};
/// use dashboard::logging::build_filter_directives;
/// use std::collections::BTreeMap;
///
/// let mut component_levels = BTreeMap::new();
/// component_levels.insert("api".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "warn".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// assert_eq!(build_filter_directives(&config), "warn,dashboard::api=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        for (component, level) in component_levels {
            filter_str.push_str(&format!(",dashboard::{}={}", component, level));
        }
    }

    filter_str
}

/// Initialize tracing to stderr. `RUST_LOG` takes precedence over the config.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}
