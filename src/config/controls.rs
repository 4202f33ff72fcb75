//! Slider ranges and preset shortcuts

use serde::{Deserialize, Serialize};

/// Bounds of one angle slider, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: i32,
    pub max: i32,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self { min: 0, max: 180 }
    }
}

/// Ranges for both axis sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub x: SliderConfig,
    pub y: SliderConfig,
}

/// A named angle pair applied with one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetConfig {
    pub name: String,
    pub x_angle: i32,
    pub y_angle: i32,
}

impl PresetConfig {
    fn new(name: &str, x_angle: i32, y_angle: i32) -> Self {
        Self {
            name: name.to_string(),
            x_angle,
            y_angle,
        }
    }
}

pub fn default_presets() -> Vec<PresetConfig> {
    vec![
        PresetConfig::new("east", 30, 60),
        PresetConfig::new("center", 90, 90),
        PresetConfig::new("west", 150, 60),
        PresetConfig::new("stow", 90, 0),
    ]
}

/// Look up a preset by name, ignoring case
pub fn find_preset<'a>(presets: &'a [PresetConfig], name: &str) -> Option<&'a PresetConfig> {
    presets.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
