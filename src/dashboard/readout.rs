//! Text rendering of sensor values.

use crate::api::SensorSnapshot;
use crate::view::Field;

pub const ANGLE_PLACEHOLDER: &str = "--°";
pub const TEMPERATURE_PLACEHOLDER: &str = "--°C";
pub const HUMIDITY_PLACEHOLDER: &str = "--%";
pub const MODE_PLACEHOLDER: &str = "--";

/// Render a number the way the web page did: no trailing `.0` on whole values.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // avoids "-0"
        return "0".to_string();
    }
    format!("{}", value)
}

fn with_unit(value: Option<f64>, unit: &str, placeholder: &str) -> String {
    match value {
        Some(v) => format!("{}{}", format_number(v), unit),
        None => placeholder.to_string(),
    }
}

pub fn angle(value: Option<f64>) -> String {
    with_unit(value, "°", ANGLE_PLACEHOLDER)
}

pub fn temperature(value: Option<f64>) -> String {
    with_unit(value, "°C", TEMPERATURE_PLACEHOLDER)
}

pub fn humidity(value: Option<f64>) -> String {
    with_unit(value, "%", HUMIDITY_PLACEHOLDER)
}

/// An empty mode string counts as absent.
pub fn mode(value: Option<&str>) -> String {
    match value {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => MODE_PLACEHOLDER.to_string(),
    }
}

/// The five sensor fields of one poll, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorReadout {
    pub x_angle: String,
    pub y_angle: String,
    pub temperature: String,
    pub humidity: String,
    pub mode: String,
}

impl SensorReadout {
    pub fn from_snapshot(snapshot: &SensorSnapshot) -> Self {
        let tracker = snapshot.tracker();
        let environment = snapshot.environment();
        Self {
            x_angle: angle(tracker.and_then(|t| t.motor_x_angle)),
            y_angle: angle(tracker.and_then(|t| t.motor_y_angle)),
            temperature: temperature(environment.and_then(|e| e.temperature)),
            humidity: humidity(environment.and_then(|e| e.humidity)),
            mode: mode(tracker.and_then(|t| t.mode.as_deref())),
        }
    }

    /// Field/text pairs in display order.
    pub fn fields(&self) -> [(Field, &str); 5] {
        [
            (Field::CurrentXAngle, &self.x_angle),
            (Field::CurrentYAngle, &self.y_angle),
            (Field::CurrentTemp, &self.temperature),
            (Field::CurrentHumidity, &self.humidity),
            (Field::CurrentMode, &self.mode),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_number_matches_page_rendering() {
        assert_eq!(format_number(45.0), "45");
        assert_eq!(format_number(23.5), "23.5");
        assert_eq!(format_number(-12.25), "-12.25");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(angle(None), "--°");
        assert_eq!(temperature(None), "--°C");
        assert_eq!(humidity(None), "--%");
        assert_eq!(mode(None), "--");
        assert_eq!(mode(Some("")), "--");
    }

    #[test]
    fn test_zero_is_a_value_not_a_placeholder() {
        assert_eq!(angle(Some(0.0)), "0°");
        assert_eq!(temperature(Some(0.0)), "0°C");
    }

    #[test]
    fn test_readout_from_partial_snapshot() {
        let snapshot: SensorSnapshot = serde_json::from_value(json!({
            "system_status": {
                "tracker": {"motor_x_angle": 45, "mode": "manual"},
                "environment": {"humidity": 60}
            }
        }))
        .unwrap();

        let readout = SensorReadout::from_snapshot(&snapshot);
        assert_eq!(readout.x_angle, "45°");
        assert_eq!(readout.y_angle, "--°");
        assert_eq!(readout.temperature, "--°C");
        assert_eq!(readout.humidity, "60%");
        assert_eq!(readout.mode, "manual");
    }

    #[test]
    fn test_readout_from_empty_snapshot() {
        let readout = SensorReadout::from_snapshot(&SensorSnapshot::default());
        let texts: Vec<_> = readout.fields().iter().map(|(_, t)| t.to_string()).collect();
        assert_eq!(texts, vec!["--°", "--°", "--°C", "--%", "--"]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// A present reading never renders as a placeholder and keeps its unit.
            #[test]
            fn prop_present_value_renders_with_unit(value in -1.0e6f64..1.0e6) {
                let rendered = temperature(Some(value));
                prop_assert!(rendered.ends_with("°C"));
                prop_assert!(!rendered.starts_with("--"));
                prop_assert!(!rendered.contains(".0°"), "trailing .0 in {}", rendered);
            }

            #[test]
            fn prop_whole_numbers_have_no_fraction(value in -100_000i32..100_000) {
                prop_assert_eq!(format_number(value as f64), value.to_string());
            }
        }
    }
}
