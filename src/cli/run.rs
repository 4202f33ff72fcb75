//! Run command implementation: the interactive terminal dashboard

use crate::api::HttpBackend;
use crate::cli::input::{parse_input, InputCommand, HELP};
use crate::cli::output::{format_fields_table, format_presets_table};
use crate::cli::RunArgs;
use crate::config::{find_preset, PresetConfig};
use crate::dashboard::Dashboard;
use crate::logging::init_tracing;
use crate::view::{TerminalView, View};
use colored::Colorize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Whether the input loop keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Dispatch one typed line. Backend requests are spawned so the prompt
/// stays responsive while they are in flight.
pub fn handle_line(
    dashboard: &Arc<Dashboard>,
    view: &TerminalView,
    presets: &[PresetConfig],
    line: &str,
) -> Flow {
    let command = match parse_input(line) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}", message.yellow());
            return Flow::Continue;
        }
    };

    match command {
        InputCommand::Chat(text) => {
            view.state().set_input(&text);
            if let Some(request) = dashboard.take_chat_input() {
                let dashboard = Arc::clone(dashboard);
                tokio::spawn(async move { dashboard.dispatch_chat(request).await });
            }
        }
        InputCommand::Slider(axis, value) => {
            view.set_slider_value(axis, value);
            dashboard.update_slider_value(axis);
            let field = axis.value_field();
            println!("{}: {}°", field.label(), view.state().text(field));
        }
        InputCommand::Apply => {
            let dashboard = Arc::clone(dashboard);
            tokio::spawn(async move { dashboard.apply_motor_control().await });
        }
        InputCommand::Move(x_angle, y_angle) => {
            let dashboard = Arc::clone(dashboard);
            tokio::spawn(async move { dashboard.set_preset(x_angle, y_angle).await });
        }
        InputCommand::Preset(name) => match find_preset(presets, &name) {
            Some(preset) => {
                let (x_angle, y_angle) = (preset.x_angle, preset.y_angle);
                let dashboard = Arc::clone(dashboard);
                tokio::spawn(async move { dashboard.set_preset(x_angle, y_angle).await });
            }
            None => eprintln!(
                "{}",
                format!("unknown preset '{}' (try /presets)", name).yellow()
            ),
        },
        InputCommand::Presets => println!("{}", format_presets_table(presets)),
        InputCommand::Auto => {
            let dashboard = Arc::clone(dashboard);
            tokio::spawn(async move { dashboard.resume_auto_mode().await });
        }
        InputCommand::Status => println!("{}", format_fields_table(&view.state().snapshot())),
        InputCommand::Help => println!("{}", HELP),
        InputCommand::Quit => return Flow::Quit,
    }

    Flow::Continue
}

/// Probe the monitoring panel; any HTTP answer counts as loaded.
async fn probe_embed(dashboard: Arc<Dashboard>, url: String) {
    match reqwest::get(&url).await {
        Ok(response) => {
            tracing::debug!(url = %url, status = %response.status(), "Monitoring panel answered");
            dashboard.on_embed_loaded();
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Monitoring panel unreachable");
        }
    }
}

/// Handle `dashboard run` command
pub async fn run_dashboard(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Configuration
    let mut config = args.connect.load_config()?;
    if let Some(interval_ms) = args.interval_ms {
        config.polling.interval_ms = interval_ms;
        config.validate()?;
    }

    // 2. Logging
    init_tracing(&config.logging)?;
    tracing::info!(base_url = %config.backend.base_url, "Starting dashboard");

    // 3. Wire backend and view
    let backend = Arc::new(HttpBackend::new(&config.backend)?);
    let view = Arc::new(TerminalView::stdout(config.controls));
    let dashboard = Arc::new(Dashboard::new(
        backend,
        view.clone(),
        config.polling.clone(),
    ));

    println!(
        "{} {}",
        "Solar tracker dashboard".bold(),
        config.backend.base_url.dimmed()
    );
    println!("Type /help for commands.");

    // 4. Background work
    {
        let dashboard = Arc::clone(&dashboard);
        tokio::spawn(async move { dashboard.check_connection().await });
    }

    let polling = if args.no_polling {
        tracing::info!("Sensor polling disabled");
        None
    } else {
        Some(dashboard.start_sensor_polling())
    };

    if let Some(url) = config.backend.embed_url.clone() {
        tokio::spawn(probe_embed(Arc::clone(&dashboard), url));
    }

    // 5. Input loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("Received SIGINT, shutting down...");
                break;
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if handle_line(&dashboard, &view, &config.presets, &line) == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read input");
                    break;
                }
            },
        }
    }

    // 6. Cleanup
    dashboard.shutdown();
    if let Some(handle) = polling {
        tracing::info!("Waiting for sensor polling to stop");
        handle.stop().await;
    }

    Ok(())
}
