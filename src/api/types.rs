//! Wire types for the dashboard backend endpoints.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /health` response.
///
/// Fields are kept raw: any reachable backend counts as connected, whatever
/// shape its body takes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthResponse {
    pub status: Option<Value>,
    pub ai_enabled: Option<Value>,
}

impl HealthResponse {
    /// Pick the known fields out of any JSON body. Non-object bodies carry
    /// no fields.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(mut fields) => Self {
                status: fields.remove("status"),
                ai_enabled: fields.remove("ai_enabled"),
            },
            _ => Self::default(),
        }
    }

    /// Truthy `ai_enabled`: `false`, `null`, `0` and `""` all mean off.
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled.as_ref().is_some_and(is_truthy)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Deserializers that turn a malformed value into `None` instead of
/// rejecting the whole snapshot.
mod lenient {
    use super::*;

    pub(super) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.and_then(|v| v.as_f64()))
    }

    pub(super) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::String(s)) => Some(s),
            _ => None,
        })
    }

    pub(super) fn section<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.and_then(|v| match serde_json::from_value(v) {
            Ok(section) => Some(section),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed sensor section");
                None
            }
        }))
    }
}

/// `GET /api/sensors` response.
///
/// Every level is optional; the hardware API omits sections it cannot read.
/// Sections beyond the tracker and environment are parsed leniently so a bad
/// extra reading never hides the core fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSnapshot {
    pub system_status: Option<SystemStatus>,
    #[serde(deserialize_with = "lenient::section")]
    pub power_metrics: Option<PowerMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemStatus {
    pub tracker: Option<TrackerStatus>,
    pub environment: Option<Environment>,
    #[serde(deserialize_with = "lenient::section")]
    pub light_sensors: Option<LightSensors>,
    #[serde(deserialize_with = "lenient::section")]
    pub controller: Option<ControllerStatus>,
    #[serde(deserialize_with = "lenient::section")]
    pub gps: Option<GpsFix>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerStatus {
    pub motor_x_angle: Option<f64>,
    pub motor_y_angle: Option<f64>,
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

/// Photodiode readings used by the tracker to find the brightest direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSensors {
    #[serde(deserialize_with = "lenient::number")]
    pub up: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub down: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub left: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub right: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerStatus {
    #[serde(deserialize_with = "lenient::number")]
    pub cpu_temp: Option<f64>,
    /// ISO-8601 time of the controller's last status refresh
    #[serde(deserialize_with = "lenient::text")]
    pub last_update: Option<String>,
}

/// Position the tracker computes the sun's path from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpsFix {
    #[serde(deserialize_with = "lenient::number")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub longitude: Option<f64>,
    /// ISO-8601; null until the first fix
    #[serde(deserialize_with = "lenient::text")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerMetrics {
    #[serde(deserialize_with = "lenient::section")]
    pub solar_panel: Option<SolarPanel>,
    #[serde(deserialize_with = "lenient::section")]
    pub battery: Option<Battery>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarPanel {
    #[serde(deserialize_with = "lenient::number")]
    pub voltage: Option<f64>,
    /// Milliamps
    #[serde(deserialize_with = "lenient::number")]
    pub current: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub power: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Battery {
    #[serde(deserialize_with = "lenient::number")]
    pub voltage: Option<f64>,
    /// Milliamps; positive while charging
    #[serde(deserialize_with = "lenient::number")]
    pub current: Option<f64>,
}

impl SensorSnapshot {
    pub fn tracker(&self) -> Option<&TrackerStatus> {
        self.system_status.as_ref()?.tracker.as_ref()
    }

    pub fn environment(&self) -> Option<&Environment> {
        self.system_status.as_ref()?.environment.as_ref()
    }

    pub fn light_sensors(&self) -> Option<&LightSensors> {
        self.system_status.as_ref()?.light_sensors.as_ref()
    }

    pub fn controller(&self) -> Option<&ControllerStatus> {
        self.system_status.as_ref()?.controller.as_ref()
    }

    pub fn cpu_temp(&self) -> Option<f64> {
        self.controller()?.cpu_temp
    }

    pub fn gps(&self) -> Option<&GpsFix> {
        self.system_status.as_ref()?.gps.as_ref()
    }

    pub fn solar_panel(&self) -> Option<&SolarPanel> {
        self.power_metrics.as_ref()?.solar_panel.as_ref()
    }

    pub fn battery(&self) -> Option<&Battery> {
        self.power_metrics.as_ref()?.battery.as_ref()
    }
}

/// `POST /api/control/motor` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorCommand {
    pub x_angle: i32,
    pub y_angle: i32,
}

/// Speaker of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One conversation turn, replayed to the assistant on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// `POST /api/chat` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: Vec<ChatMessage>,
}

/// `POST /api/chat` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    /// Kept raw so an unknown or malformed action never fails the reply
    #[serde(default)]
    pub action: Option<serde_json::Value>,
}

/// Structured action attached to an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatAction {
    MotorControl { x_angle: i32, y_angle: i32 },
    #[serde(other)]
    Unsupported,
}

impl ChatResponse {
    /// The action, if present and well-formed.
    pub fn action(&self) -> Option<ChatAction> {
        let raw = self.action.as_ref().filter(|v| !v.is_null())?;
        match serde_json::from_value::<ChatAction>(raw.clone()) {
            Ok(action) => Some(action),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed chat action");
                None
            }
        }
    }

    /// Target angles when the reply carries a `motor_control` action.
    pub fn motor_action(&self) -> Option<MotorCommand> {
        match self.action()? {
            ChatAction::MotorControl { x_angle, y_angle } => Some(MotorCommand { x_angle, y_angle }),
            ChatAction::Unsupported => None,
        }
    }
}
