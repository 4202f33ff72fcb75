//! In-memory view: headless rendering target for one-shot commands and tests.

use super::{Axis, ChatLine, Field, PlaceholderState, Slider, View};
use crate::config::ControlsConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct ViewState {
    fields: BTreeMap<Field, String>,
    disconnected: bool,
    x_slider: Slider,
    y_slider: Slider,
    input: String,
    messages: Vec<ChatLine>,
    placeholder: PlaceholderState,
}

/// Point-in-time copy of everything a [`MemoryView`] displays.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub fields: BTreeMap<Field, String>,
    pub disconnected: bool,
    pub x_slider: i32,
    pub y_slider: i32,
    pub messages: Vec<ChatLine>,
    pub placeholder: PlaceholderState,
}

/// Thread-safe view that keeps the rendered state in memory.
#[derive(Debug)]
pub struct MemoryView {
    state: Mutex<ViewState>,
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new(ControlsConfig::default())
    }
}

impl MemoryView {
    pub fn new(controls: ControlsConfig) -> Self {
        let fields = Field::ALL
            .iter()
            .map(|f| (*f, f.initial_text().to_string()))
            .collect();
        Self {
            state: Mutex::new(ViewState {
                fields,
                disconnected: false,
                x_slider: Slider::new(controls.x),
                y_slider: Slider::new(controls.y),
                input: String::new(),
                messages: Vec::new(),
                placeholder: PlaceholderState::Visible,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("View state mutex poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    pub fn text(&self, field: Field) -> String {
        self.state().fields.get(&field).cloned().unwrap_or_default()
    }

    pub fn is_disconnected(&self) -> bool {
        self.state().disconnected
    }

    /// Type into the chat input.
    pub fn set_input(&self, text: &str) {
        self.state().input = text.to_string();
    }

    pub fn messages(&self) -> Vec<ChatLine> {
        self.state().messages.clone()
    }

    pub fn message_texts(&self) -> Vec<String> {
        self.state().messages.iter().map(|m| m.text.clone()).collect()
    }

    pub fn placeholder(&self) -> PlaceholderState {
        self.state().placeholder
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.state();
        ViewSnapshot {
            fields: state.fields.clone(),
            disconnected: state.disconnected,
            x_slider: state.x_slider.value(),
            y_slider: state.y_slider.value(),
            messages: state.messages.clone(),
            placeholder: state.placeholder,
        }
    }
}

impl View for MemoryView {
    fn set_text(&self, field: Field, text: &str) {
        self.state().fields.insert(field, text.to_string());
    }

    fn set_disconnected(&self, disconnected: bool) {
        self.state().disconnected = disconnected;
    }

    fn slider_value(&self, axis: Axis) -> i32 {
        let state = self.state();
        match axis {
            Axis::X => state.x_slider.value(),
            Axis::Y => state.y_slider.value(),
        }
    }

    fn set_slider_value(&self, axis: Axis, value: i32) {
        let mut state = self.state();
        match axis {
            Axis::X => state.x_slider.set(value),
            Axis::Y => state.y_slider.set(value),
        }
    }

    fn input_text(&self) -> String {
        self.state().input.clone()
    }

    fn clear_input(&self) {
        self.state().input.clear();
    }

    fn append_message(&self, line: ChatLine) {
        self.state().messages.push(line);
    }

    fn set_placeholder(&self, state: PlaceholderState) {
        self.state().placeholder = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliderConfig;

    #[test]
    fn test_initial_state() {
        let view = MemoryView::default();
        assert_eq!(view.text(Field::CurrentTemp), "--°C");
        assert_eq!(view.text(Field::ConnectionStatus), "Connecting...");
        assert_eq!(view.slider_value(Axis::X), 90);
        assert!(view.messages().is_empty());
        assert_eq!(view.placeholder(), PlaceholderState::Visible);
    }

    #[test]
    fn test_slider_writes_respect_configured_range() {
        let view = MemoryView::new(ControlsConfig {
            x: SliderConfig { min: 0, max: 180 },
            y: SliderConfig { min: 30, max: 150 },
        });
        view.set_slider_value(Axis::Y, 10);
        view.set_slider_value(Axis::X, 181);
        assert_eq!(view.slider_value(Axis::Y), 30);
        assert_eq!(view.slider_value(Axis::X), 180);
    }

    #[test]
    fn test_input_round_trip() {
        let view = MemoryView::default();
        view.set_input("  hello ");
        assert_eq!(view.input_text(), "  hello ");
        view.clear_input();
        assert_eq!(view.input_text(), "");
    }

    #[test]
    fn test_snapshot_serializes_field_ids() {
        let view = MemoryView::default();
        view.set_text(Field::CurrentMode, "auto");
        let json = serde_json::to_value(view.snapshot()).unwrap();
        assert_eq!(json["fields"]["current-mode"], "auto");
        assert_eq!(json["placeholder"], "visible");
    }
}
