//! Shared helpers for dashboard integration tests.

#![allow(dead_code)]

use dashboard::api::HttpBackend;
use dashboard::config::{BackendConfig, ControlsConfig, PollingConfig};
use dashboard::dashboard::Dashboard;
use dashboard::view::MemoryView;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Polling settings with short delays so tests finish quickly.
pub fn fast_polling() -> PollingConfig {
    PollingConfig {
        interval_ms: 100,
        refresh_delay_ms: 20,
        placeholder_fade_ms: 20,
    }
}

pub fn backend_for(uri: &str) -> HttpBackend {
    let config = BackendConfig {
        base_url: uri.to_string(),
        timeout_seconds: Some(5),
        embed_url: None,
    };
    HttpBackend::new(&config).unwrap()
}

/// Dashboard wired to a real HTTP backend and an in-memory view.
pub fn dashboard_for(uri: &str) -> (Arc<Dashboard>, Arc<MemoryView>) {
    let view = Arc::new(MemoryView::new(ControlsConfig::default()));
    let dashboard = Arc::new(Dashboard::new(
        Arc::new(backend_for(uri)),
        view.clone(),
        fast_polling(),
    ));
    (dashboard, view)
}

/// A complete `/api/sensors` body.
pub fn sensors_body() -> Value {
    json!({
        "system_status": {
            "tracker": {"motor_x_angle": 45, "motor_y_angle": 30.5, "mode": "auto"},
            "environment": {"temperature": 21.5, "humidity": 40},
            "light_sensors": {"up": 512, "down": 300, "left": 410, "right": 405},
            "controller": {"cpu_temp": 48.2}
        },
        "power_metrics": {
            "solar_panel": {"voltage": 18.2, "current": 220, "power": 4},
            "battery": {"voltage": 12.6, "current": -35}
        }
    })
}

/// Poll `condition` until it holds or two seconds pass.
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
