//! Terminal view: renders the message list and connection changes as lines
//! on a writer (stdout by default), and keeps the field state for the
//! `/status` table.

use super::{Axis, ChatLine, Field, MemoryView, PlaceholderState, Sender, View};
use crate::config::ControlsConfig;
use colored::Colorize;
use std::io::{self, Write};
use std::sync::Mutex;

pub struct TerminalView {
    state: MemoryView,
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalView {
    pub fn stdout(controls: ControlsConfig) -> Self {
        Self::with_writer(controls, Box::new(io::stdout()))
    }

    pub fn with_writer(controls: ControlsConfig, out: Box<dyn Write + Send>) -> Self {
        Self {
            state: MemoryView::new(controls),
            out: Mutex::new(out),
        }
    }

    /// Rendered state backing this view.
    pub fn state(&self) -> &MemoryView {
        &self.state
    }

    fn print(&self, line: &str) {
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }

    fn format_message(line: &ChatLine) -> String {
        let time = line.at.with_timezone(&chrono::Local).format("%H:%M:%S");
        match line.sender {
            Sender::User => format!("{} {} {}", time.to_string().dimmed(), "you".cyan().bold(), line.text),
            Sender::Bot => format!("{} {} {}", time.to_string().dimmed(), "bot".green().bold(), line.text),
        }
    }
}

impl View for TerminalView {
    fn set_text(&self, field: Field, text: &str) {
        let changed = self.state.text(field) != text;
        self.state.set_text(field, text);
        if field == Field::ConnectionStatus && changed {
            let rendered = if self.state.is_disconnected() {
                text.red().to_string()
            } else {
                text.green().to_string()
            };
            self.print(&rendered);
        }
    }

    fn set_disconnected(&self, disconnected: bool) {
        self.state.set_disconnected(disconnected);
    }

    fn slider_value(&self, axis: Axis) -> i32 {
        self.state.slider_value(axis)
    }

    fn set_slider_value(&self, axis: Axis, value: i32) {
        self.state.set_slider_value(axis, value);
    }

    fn input_text(&self) -> String {
        self.state.input_text()
    }

    fn clear_input(&self) {
        self.state.clear_input();
    }

    fn append_message(&self, line: ChatLine) {
        self.print(&Self::format_message(&line));
        self.state.append_message(line);
    }

    fn set_placeholder(&self, state: PlaceholderState) {
        self.state.set_placeholder(state);
        if state == PlaceholderState::Hidden {
            self.print(&"Monitoring panel loaded".dimmed().to_string());
        }
    }
}
