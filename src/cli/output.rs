//! Output formatting helpers for CLI commands

use crate::api::SensorSnapshot;
use crate::config::PresetConfig;
use crate::dashboard::readout::format_number;
use crate::view::{Field, ViewSnapshot};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

const MISSING: &str = "--";

fn with_unit(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{}{}", format_number(v), unit))
        .unwrap_or_else(|| MISSING.to_string())
}

fn text_or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Format the rendered dashboard fields as a table
pub fn format_fields_table(view: &ViewSnapshot) -> String {
    let mut table = new_table(vec!["Field", "Value"]);

    for (field, text) in &view.fields {
        let value = match field {
            Field::ConnectionStatus if view.disconnected => text.red().to_string(),
            Field::ConnectionStatus => text.green().to_string(),
            _ => text.clone(),
        };
        table.add_row(vec![Cell::new(field.label()), Cell::new(value)]);
    }

    table.to_string()
}

/// Readings beyond the five dashboard fields, as label/value pairs
pub fn metric_rows(sensors: &SensorSnapshot) -> Vec<(&'static str, String)> {
    let light = sensors.light_sensors();
    let solar = sensors.solar_panel();
    let battery = sensors.battery();
    let gps = sensors.gps();

    vec![
        ("CPU temperature", with_unit(sensors.cpu_temp(), "°C")),
        ("Solar voltage", with_unit(solar.and_then(|s| s.voltage), " V")),
        ("Solar current", with_unit(solar.and_then(|s| s.current), " mA")),
        ("Solar power", with_unit(solar.and_then(|s| s.power), " W")),
        ("Battery voltage", with_unit(battery.and_then(|b| b.voltage), " V")),
        ("Battery current", with_unit(battery.and_then(|b| b.current), " mA")),
        ("Light (up)", with_unit(light.and_then(|l| l.up), "")),
        ("Light (down)", with_unit(light.and_then(|l| l.down), "")),
        ("Light (left)", with_unit(light.and_then(|l| l.left), "")),
        ("Light (right)", with_unit(light.and_then(|l| l.right), "")),
        ("GPS latitude", with_unit(gps.and_then(|g| g.latitude), "°")),
        ("GPS longitude", with_unit(gps.and_then(|g| g.longitude), "°")),
        ("GPS fix time", text_or_missing(gps.and_then(|g| g.timestamp.as_deref()))),
        (
            "Controller update",
            text_or_missing(sensors.controller().and_then(|c| c.last_update.as_deref())),
        ),
    ]
}

/// Format the extra sensor metrics as a table
pub fn format_metrics_table(sensors: &SensorSnapshot) -> String {
    let mut table = new_table(vec!["Metric", "Value"]);
    for (label, value) in metric_rows(sensors) {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table.to_string()
}

/// Format a status report as JSON
pub fn format_status_json(
    view: &ViewSnapshot,
    sensors: Option<&SensorSnapshot>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "connected": !view.disconnected,
        "fields": view.fields,
        "sensors": sensors,
    }))
}

/// Format configured presets as a table
pub fn format_presets_table(presets: &[PresetConfig]) -> String {
    let mut table = new_table(vec!["Preset", "X", "Y"]);
    for p in presets {
        table.add_row(vec![
            Cell::new(&p.name),
            Cell::new(format!("{}°", p.x_angle)),
            Cell::new(format!("{}°", p.y_angle)),
        ]);
    }
    table.to_string()
}
