//! Dashboard controller.
//!
//! Ties a [`Backend`] to a [`View`]: renders connectivity and sensor state,
//! dispatches motor, auto-mode and chat actions, and owns the conversation
//! transcript. Every operation runs to completion on its own; overlapping
//! requests are neither queued nor coalesced, so the view reflects responses
//! in the order they resolve.

mod poller;
pub mod readout;
mod transcript;


pub use poller::PollingHandle;
pub use readout::SensorReadout;
pub use transcript::Transcript;

use crate::api::{ApiError, Backend, ChatMessage, ChatRequest, MotorCommand, SensorSnapshot};
use crate::config::PollingConfig;
use crate::view::{Axis, ChatLine, Field, PlaceholderState, View};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const STATUS_AI_CONNECTED: &str = "✓ AI connected";
pub const STATUS_CONNECTED_NO_AI: &str = "✓ Connected (AI disabled)";
pub const STATUS_DISCONNECTED: &str = "✗ Disconnected";

pub const AUTO_MODE_RESUMED: &str = "🛰️ Resuming GPS auto-tracking mode.";

const MOTOR_CONTROL_FAILED: &str = "motor control failed";
const AUTO_RESUME_FAILED: &str = "GPS auto mode resume failed";
const CHAT_FAILED: &str = "AI response failed";

/// Visible-log text for a failed user action.
pub fn error_line(context: &str, error: &ApiError) -> String {
    format!("⚠️ Error: {}: {}", context, error)
}

pub fn motor_confirmation(command: MotorCommand) -> String {
    format!(
        "Motor control: X={}°, Y={}°",
        command.x_angle, command.y_angle
    )
}

pub struct Dashboard {
    backend: Arc<dyn Backend>,
    view: Arc<dyn View>,
    transcript: Transcript,
    polling: PollingConfig,
    shutdown: CancellationToken,
}

impl Dashboard {
    pub fn new(backend: Arc<dyn Backend>, view: Arc<dyn View>, polling: PollingConfig) -> Self {
        Self::with_transcript(backend, view, polling, Transcript::new())
    }

    /// Start from an existing conversation instead of an empty one.
    pub fn with_transcript(
        backend: Arc<dyn Backend>,
        view: Arc<dyn View>,
        polling: PollingConfig,
        transcript: Transcript,
    ) -> Self {
        Self {
            backend,
            view,
            transcript,
            polling,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn view(&self) -> &Arc<dyn View> {
        &self.view
    }

    /// Query `/health` once and render the connection indicator.
    pub async fn check_connection(&self) {
        match self.backend.health().await {
            Ok(health) => {
                let text = if health.ai_enabled() {
                    STATUS_AI_CONNECTED
                } else {
                    STATUS_CONNECTED_NO_AI
                };
                self.view.set_disconnected(false);
                self.view.set_text(Field::ConnectionStatus, text);
                tracing::info!(ai_enabled = health.ai_enabled(), "Backend reachable");
            }
            Err(e) => {
                self.view.set_disconnected(true);
                self.view.set_text(Field::ConnectionStatus, STATUS_DISCONNECTED);
                tracing::warn!(error = %e, "Health check failed");
            }
        }
    }

    /// Poll once now, then every `interval_ms` until cancelled.
    ///
    /// Each tick runs its poll as a separate task, so a slow response never
    /// delays the next tick.
    pub fn start_sensor_polling(self: &Arc<Self>) -> PollingHandle {
        let token = self.shutdown.child_token();
        let loop_token = token.clone();
        let dashboard = Arc::clone(self);
        let period = self.polling.interval();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            tracing::info!(interval_ms = period.as_millis() as u64, "Sensor polling started");

            loop {
                tokio::select! {
                    biased;
                    _ = loop_token.cancelled() => {
                        tracing::info!("Sensor polling stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        let poll = Arc::clone(&dashboard);
                        tokio::spawn(async move {
                            poll.update_sensor_data().await;
                        });
                    }
                }
            }
        });

        PollingHandle::new(token, task)
    }

    /// Fetch `/api/sensors` and render the five sensor fields.
    ///
    /// Failures are logged only; the previous values stay on screen. The
    /// rendered snapshot is returned for callers that show more than the
    /// five fields.
    pub async fn update_sensor_data(&self) -> Option<SensorSnapshot> {
        match self.backend.sensors().await {
            Ok(snapshot) => {
                let readout = SensorReadout::from_snapshot(&snapshot);
                for (field, text) in readout.fields() {
                    self.view.set_text(field, text);
                }
                tracing::debug!(?readout, "Sensor data updated");
                Some(snapshot)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sensor data update failed");
                None
            }
        }
    }

    /// Copy a slider's value into its readout.
    pub fn update_slider_value(&self, axis: Axis) {
        let value = self.view.slider_value(axis);
        self.view.set_text(axis.value_field(), &value.to_string());
    }

    fn set_sliders(&self, command: MotorCommand) {
        self.view.set_slider_value(Axis::X, command.x_angle);
        self.view.set_slider_value(Axis::Y, command.y_angle);
        self.update_slider_value(Axis::X);
        self.update_slider_value(Axis::Y);
    }

    /// Send the current slider angles to the motor controller.
    pub async fn apply_motor_control(self: &Arc<Self>) {
        let command = MotorCommand {
            x_angle: self.view.slider_value(Axis::X),
            y_angle: self.view.slider_value(Axis::Y),
        };

        match self.backend.control_motor(command).await {
            Ok(()) => {
                tracing::info!(
                    x_angle = command.x_angle,
                    y_angle = command.y_angle,
                    "Motor command applied"
                );
                self.view.append_message(ChatLine::bot(motor_confirmation(command)));
                self.schedule_refresh();
            }
            Err(e) => {
                tracing::error!(error = %e, "Motor control failed");
                self.view
                    .append_message(ChatLine::bot(error_line(MOTOR_CONTROL_FAILED, &e)));
            }
        }
    }

    /// Move both sliders to a preset and dispatch it.
    pub async fn set_preset(self: &Arc<Self>, x_angle: i32, y_angle: i32) {
        self.set_sliders(MotorCommand { x_angle, y_angle });
        self.apply_motor_control().await;
    }

    /// Hand control back to GPS-based tracking.
    pub async fn resume_auto_mode(self: &Arc<Self>) {
        match self.backend.resume_auto().await {
            Ok(()) => {
                tracing::info!("Auto tracking resumed");
                self.view.append_message(ChatLine::bot(AUTO_MODE_RESUMED));
                self.schedule_refresh();
            }
            Err(e) => {
                tracing::error!(error = %e, "Auto mode resume failed");
                self.view
                    .append_message(ChatLine::bot(error_line(AUTO_RESUME_FAILED, &e)));
            }
        }
    }

    /// Send the chat input to the assistant along with the full transcript.
    ///
    /// A blank input is ignored without touching the view. When the request
    /// fails the user turn stays in the transcript with no reply.
    pub async fn send_message(self: &Arc<Self>) {
        if let Some(request) = self.take_chat_input() {
            self.dispatch_chat(request).await;
        }
    }

    /// Synchronous half of [`send_message`](Self::send_message): consume the
    /// input, log it, record the user turn and build the request.
    ///
    /// Lets a caller that fills the input and fires requests concurrently
    /// capture each message before the next one is typed.
    pub fn take_chat_input(&self) -> Option<ChatRequest> {
        let input = self.view.input_text();
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        let message = message.to_string();

        self.view.append_message(ChatLine::user(message.as_str()));
        self.view.clear_input();
        let conversation_history = self
            .transcript
            .push_and_snapshot(ChatMessage::user(message.as_str()));

        Some(ChatRequest {
            message,
            conversation_history,
        })
    }

    /// Asynchronous half of [`send_message`](Self::send_message).
    pub async fn dispatch_chat(self: &Arc<Self>, request: ChatRequest) {
        match self.backend.chat(request).await {
            Ok(reply) => {
                self.view.append_message(ChatLine::bot(reply.response.as_str()));
                self.transcript
                    .push(ChatMessage::assistant(reply.response.as_str()));

                if let Some(command) = reply.motor_action() {
                    tracing::info!(
                        x_angle = command.x_angle,
                        y_angle = command.y_angle,
                        "Assistant moved the tracker"
                    );
                    self.set_sliders(command);
                    self.schedule_refresh();
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Chat request failed");
                self.view.append_message(ChatLine::bot(error_line(CHAT_FAILED, &e)));
            }
        }
    }

    /// The embedded monitoring panel finished loading: fade the placeholder
    /// out, then hide it.
    pub fn on_embed_loaded(&self) {
        self.view.set_placeholder(PlaceholderState::FadingOut);
        let view = Arc::clone(&self.view);
        self.after(self.polling.placeholder_fade(), async move {
            view.set_placeholder(PlaceholderState::Hidden);
        });
    }

    /// Stop polling and drop every pending deferred update.
    pub fn shutdown(&self) {
        tracing::debug!("Dashboard shutting down");
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    fn schedule_refresh(self: &Arc<Self>) {
        let dashboard = Arc::clone(self);
        self.after(self.polling.refresh_delay(), async move {
            dashboard.update_sensor_data().await;
        });
    }

    /// Run `task` after `delay` unless the dashboard shuts down first.
    fn after<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => task.await,
            }
        });
    }
}
