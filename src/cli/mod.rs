//! CLI module for the tracker dashboard
//!
//! # Commands
//!
//! - `run` - Interactive terminal dashboard (polling, motor control, chat)
//! - `status` - One-shot connection and sensor report
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Connect to the tracker on the local network
//! dashboard run --url http://raspberrypi.local:8080
//!
//! # Machine-readable sensor report
//! dashboard status --json
//! ```

pub mod completions;
pub mod config;
pub mod input;
pub mod output;
pub mod run;
pub mod status;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::{ConfigError, DashboardConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Solar tracker dashboard
#[derive(Parser, Debug)]
#[command(
    name = "dashboard",
    version,
    about = "Terminal dashboard for a solar tracker"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive dashboard
    Run(RunArgs),
    /// Print connection and sensor status once
    Status(StatusArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that talks to the backend
#[derive(Args, Debug, Clone)]
pub struct ConnectArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "dashboard.toml")]
    pub config: PathBuf,

    /// Override the backend base URL
    #[arg(short, long, env = "DASHBOARD_URL")]
    pub url: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DASHBOARD_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl ConnectArgs {
    /// Defaults, then file, then environment, then flags.
    pub fn load_config(&self) -> Result<DashboardConfig, ConfigError> {
        let mut config = DashboardConfig::load_or_default(&self.config)?.with_env_overrides();

        if let Some(ref url) = self.url {
            config.backend.base_url = url.clone();
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Override the sensor polling interval in milliseconds
    #[arg(short = 'i', long)]
    pub interval_ms: Option<u64>,

    /// Do not poll sensors (refreshes after actions still happen)
    #[arg(long)]
    pub no_polling: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write an example configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "dashboard.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
