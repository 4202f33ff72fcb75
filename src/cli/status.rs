//! Status command implementation

use crate::api::HttpBackend;
use crate::cli::output::{format_fields_table, format_metrics_table, format_status_json};
use crate::cli::StatusArgs;
use crate::dashboard::Dashboard;
use crate::logging::init_tracing;
use crate::view::{Field, MemoryView};
use std::sync::Arc;

/// Handle `dashboard status` command
///
/// Runs one connection check and one sensor poll, prints the result, and
/// fails when the backend is unreachable.
pub async fn run_status(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.connect.load_config()?;
    init_tracing(&config.logging)?;

    let backend = Arc::new(HttpBackend::new(&config.backend)?);
    let view = Arc::new(MemoryView::new(config.controls));
    let dashboard = Dashboard::new(backend, view.clone(), config.polling.clone());

    let ((), sensors) = tokio::join!(
        dashboard.check_connection(),
        dashboard.update_sensor_data()
    );

    let mut snapshot = view.snapshot();
    // slider readouts have no meaning outside the interactive dashboard
    snapshot
        .fields
        .retain(|field, _| !matches!(field, Field::XValue | Field::YValue));

    if args.json {
        println!("{}", format_status_json(&snapshot, sensors.as_ref())?);
    } else {
        println!("{}", format_fields_table(&snapshot));
        if let Some(ref sensors) = sensors {
            println!("{}", format_metrics_table(sensors));
        }
    }

    if snapshot.disconnected {
        return Err(format!("backend unreachable at {}", config.backend.base_url).into());
    }
    Ok(())
}
