//! Backend access layer.
//!
//! The [`Backend`] trait is the seam between the dashboard controller and
//! the HTTP endpoints it drives. [`HttpBackend`] is the production
//! implementation; tests substitute scripted backends.

pub mod error;
pub mod types;

pub use error::ApiError;
pub use types::{
    Battery, ChatAction, ChatMessage, ChatRequest, ChatResponse, ControllerStatus, Environment,
    GpsFix, HealthResponse, LightSensors, MotorCommand, PowerMetrics, Role, SensorSnapshot,
    SolarPanel, SystemStatus, TrackerStatus,
};

use crate::config::BackendConfig;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const HEALTH_PATH: &str = "/health";
pub const SENSORS_PATH: &str = "/api/sensors";
pub const MOTOR_CONTROL_PATH: &str = "/api/control/motor";
pub const AUTO_RESUME_PATH: &str = "/api/control/auto/resume";
pub const CHAT_PATH: &str = "/api/chat";

/// Endpoints the dashboard depends on.
///
/// Object-safe; the controller holds it as `Arc<dyn Backend>`.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// `GET /health`
    async fn health(&self) -> Result<HealthResponse, ApiError>;

    /// `GET /api/sensors`
    async fn sensors(&self) -> Result<SensorSnapshot, ApiError>;

    /// `POST /api/control/motor`
    async fn control_motor(&self, command: MotorCommand) -> Result<(), ApiError>;

    /// `POST /api/control/auto/resume` (no body)
    async fn resume_auto(&self) -> Result<(), ApiError>;

    /// `POST /api/chat`
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ApiError>;
}

/// reqwest-backed [`Backend`] rooted at a base URL.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
    timeout_seconds: Option<u64>,
}

impl HttpBackend {
    /// Build a backend from configuration.
    ///
    /// No request timeout is applied unless `timeout_seconds` is set.
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self::with_client(config, client))
    }

    /// Build a backend around an existing client (for testing).
    pub fn with_client(config: &BackendConfig, client: Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            timeout_seconds: config.timeout_seconds,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the status line, leaving the body unread.
    fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::HttpError(status.as_u16()))
        }
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_seconds))?;
        serde_json::from_str(&body).map_err(|e| ApiError::ParseError(e.to_string()))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_seconds))?;
        Self::ensure_success(response)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let response = self.send(self.client.get(self.url(HEALTH_PATH))).await?;
        let body: serde_json::Value = self.decode(response).await?;
        Ok(HealthResponse::from_body(body))
    }

    async fn sensors(&self) -> Result<SensorSnapshot, ApiError> {
        let response = self.send(self.client.get(self.url(SENSORS_PATH))).await?;
        self.decode(response).await
    }

    async fn control_motor(&self, command: MotorCommand) -> Result<(), ApiError> {
        tracing::debug!(
            x_angle = command.x_angle,
            y_angle = command.y_angle,
            "Sending motor command"
        );
        self.send(self.client.post(self.url(MOTOR_CONTROL_PATH)).json(&command))
            .await?;
        Ok(())
    }

    async fn resume_auto(&self) -> Result<(), ApiError> {
        self.send(self.client.post(self.url(AUTO_RESUME_PATH)))
            .await?;
        Ok(())
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ApiError> {
        tracing::debug!(
            history_len = request.conversation_history.len(),
            "Sending chat message"
        );
        let response = self
            .send(self.client.post(self.url(CHAT_PATH)).json(&request))
            .await?;
        self.decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = BackendConfig {
            base_url: "http://pi.local:8080/".to_string(),
            ..Default::default()
        };
        let backend = HttpBackend::new(&config).unwrap();
        assert_eq!(backend.base_url(), "http://pi.local:8080");
        assert_eq!(backend.url(SENSORS_PATH), "http://pi.local:8080/api/sensors");
    }
}
