//! Rendering surface for the dashboard.
//!
//! [`View`] is the capability set the controller needs from a page: set the
//! text of a named field, read and write slider controls, read and clear the
//! chat input, append to the message list, and toggle a couple of visual
//! states. Implementations are synchronous; every call is a short in-memory
//! update.

pub mod memory;
pub mod terminal;

pub use memory::{MemoryView, ViewSnapshot};
pub use terminal::TerminalView;

use crate::config::SliderConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Text fields the controller writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    ConnectionStatus,
    CurrentXAngle,
    CurrentYAngle,
    CurrentTemp,
    CurrentHumidity,
    CurrentMode,
    XValue,
    YValue,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::ConnectionStatus,
        Field::CurrentXAngle,
        Field::CurrentYAngle,
        Field::CurrentTemp,
        Field::CurrentHumidity,
        Field::CurrentMode,
        Field::XValue,
        Field::YValue,
    ];

    /// Element id of the field in the HTML page.
    pub fn element_id(self) -> &'static str {
        match self {
            Field::ConnectionStatus => "connection-status",
            Field::CurrentXAngle => "current-x-angle",
            Field::CurrentYAngle => "current-y-angle",
            Field::CurrentTemp => "current-temp",
            Field::CurrentHumidity => "current-humidity",
            Field::CurrentMode => "current-mode",
            Field::XValue => "x-value",
            Field::YValue => "y-value",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::ConnectionStatus => "Connection",
            Field::CurrentXAngle => "X angle",
            Field::CurrentYAngle => "Y angle",
            Field::CurrentTemp => "Temperature",
            Field::CurrentHumidity => "Humidity",
            Field::CurrentMode => "Mode",
            Field::XValue => "X slider",
            Field::YValue => "Y slider",
        }
    }

    /// Text shown before anything has been rendered.
    pub fn initial_text(self) -> &'static str {
        match self {
            Field::ConnectionStatus => "Connecting...",
            Field::CurrentXAngle | Field::CurrentYAngle => "--°",
            Field::CurrentTemp => "--°C",
            Field::CurrentHumidity => "--%",
            Field::CurrentMode => "--",
            Field::XValue | Field::YValue => "",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Motor axis, each with its own slider and readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn slider_id(self) -> &'static str {
        match self {
            Axis::X => "x-slider",
            Axis::Y => "y-slider",
        }
    }

    /// Readout field next to the slider.
    pub fn value_field(self) -> Field {
        match self {
            Axis::X => Field::XValue,
            Axis::Y => Field::YValue,
        }
    }
}

/// Integer range control. Writes are clamped to the range, the way a range
/// input clamps an assigned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    value: i32,
    min: i32,
    max: i32,
}

fn midpoint(min: i32, max: i32) -> i32 {
    let (min, max) = (i64::from(min), i64::from(max));
    // lies between min and max, so it fits back in i32
    (min + (max - min) / 2) as i32
}

impl Slider {
    /// A slider resting at the middle of its range.
    pub fn new(config: SliderConfig) -> Self {
        Self {
            value: midpoint(config.min, config.max),
            min: config.min,
            max: config.max,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn set(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
    }
}

/// Who a message-list entry is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One entry of the visible message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatLine {
    pub sender: Sender,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl ChatLine {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            at: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// Overlay shown until the embedded monitoring panel has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderState {
    #[default]
    Visible,
    FadingOut,
    Hidden,
}

/// Rendering capabilities the dashboard controller relies on.
pub trait View: Send + Sync + 'static {
    fn set_text(&self, field: Field, text: &str);

    /// Toggle the disconnected visual state of the connection indicator.
    fn set_disconnected(&self, disconnected: bool);

    fn slider_value(&self, axis: Axis) -> i32;

    fn set_slider_value(&self, axis: Axis, value: i32);

    fn input_text(&self) -> String;

    fn clear_input(&self);

    fn append_message(&self, line: ChatLine);

    fn set_placeholder(&self, state: PlaceholderState);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_element_ids() {
        assert_eq!(Field::ConnectionStatus.element_id(), "connection-status");
        assert_eq!(Field::CurrentHumidity.to_string(), "current-humidity");
        assert_eq!(Axis::X.slider_id(), "x-slider");
        assert_eq!(Axis::Y.value_field(), Field::YValue);
    }

    #[test]
    fn test_slider_clamps_to_range() {
        let mut slider = Slider::new(SliderConfig { min: 30, max: 150 });
        assert_eq!(slider.value(), 90);

        slider.set(200);
        assert_eq!(slider.value(), 150);
        slider.set(-5);
        assert_eq!(slider.value(), 30);
        slider.set(45);
        assert_eq!(slider.value(), 45);
    }

    #[test]
    fn test_slider_midpoint_of_extreme_range() {
        let slider = Slider::new(SliderConfig {
            min: i32::MIN,
            max: i32::MAX,
        });
        assert_eq!(slider.value(), -1);

        let slider = Slider::new(SliderConfig { min: -90, max: 90 });
        assert_eq!(slider.value(), 0);
    }
}
