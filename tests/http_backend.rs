//! HttpBackend against mock HTTP servers.

mod common;

use common::{backend_for, sensors_body};
use dashboard::api::{ApiError, Backend, ChatMessage, ChatRequest, HttpBackend, MotorCommand};
use dashboard::config::BackendConfig;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_health_reads_ai_flag() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "ai_enabled": true})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let health = backend_for(&mock_server.uri()).health().await.unwrap();
    assert!(health.ai_enabled());
    assert_eq!(health.status, Some(json!("ok")));
}

#[tokio::test]
async fn test_health_without_ai_flag() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&mock_server)
        .await;

    let health = backend_for(&mock_server.uri()).health().await.unwrap();
    assert!(!health.ai_enabled());
}

#[tokio::test]
async fn test_health_loose_body_types() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": 200, "ai_enabled": 1})),
        )
        .mount(&mock_server)
        .await;

    let health = backend_for(&mock_server.uri()).health().await.unwrap();
    assert!(health.ai_enabled());
    assert_eq!(health.status, Some(json!(200)));
}

#[tokio::test]
async fn test_health_non_object_body_is_reachable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("ok")))
        .mount(&mock_server)
        .await;

    let health = backend_for(&mock_server.uri()).health().await.unwrap();
    assert!(!health.ai_enabled());
}

#[tokio::test]
async fn test_sensors_full_snapshot() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sensors_body()))
        .mount(&mock_server)
        .await;

    let snapshot = backend_for(&mock_server.uri()).sensors().await.unwrap();
    let tracker = snapshot.tracker().unwrap();
    assert_eq!(tracker.motor_x_angle, Some(45.0));
    assert_eq!(tracker.mode.as_deref(), Some("auto"));
    assert_eq!(snapshot.cpu_temp(), Some(48.2));
    assert_eq!(snapshot.battery().unwrap().current, Some(-35.0));
}

#[tokio::test]
async fn test_sensors_empty_object() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let snapshot = backend_for(&mock_server.uri()).sensors().await.unwrap();
    assert!(snapshot.tracker().is_none());
    assert!(snapshot.environment().is_none());
}

#[tokio::test]
async fn test_control_motor_posts_angles() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/control/motor"))
        .and(body_json(json!({"x_angle": 150, "y_angle": 60})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    backend_for(&mock_server.uri())
        .control_motor(MotorCommand {
            x_angle: 150,
            y_angle: 60,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_resume_auto_posts_without_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/control/auto/resume"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    backend_for(&mock_server.uri()).resume_auto().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_chat_sends_message_and_history() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({
            "message": "face west",
            "conversation_history": [
                {"role": "user", "content": "hello"},
                {"role": "assistant", "content": "hi"},
                {"role": "user", "content": "face west"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Turning west.",
            "action": {"type": "motor_control", "x_angle": 150, "y_angle": 60}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = backend_for(&mock_server.uri())
        .chat(ChatRequest {
            message: "face west".to_string(),
            conversation_history: vec![
                ChatMessage::user("hello"),
                ChatMessage::assistant("hi"),
                ChatMessage::user("face west"),
            ],
        })
        .await
        .unwrap();

    assert_eq!(reply.response, "Turning west.");
    assert_eq!(
        reply.motor_action(),
        Some(MotorCommand {
            x_angle: 150,
            y_angle: 60
        })
    );
}

#[tokio::test]
async fn test_chat_missing_response_is_parse_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "no model"})))
        .mount(&mock_server)
        .await;

    let err = backend_for(&mock_server.uri())
        .chat(ChatRequest {
            message: "hi".to_string(),
            conversation_history: vec![ChatMessage::user("hi")],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ParseError(_)));
}

#[tokio::test]
async fn test_http_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/control/motor"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = backend_for(&mock_server.uri())
        .control_motor(MotorCommand {
            x_angle: 0,
            y_angle: 0,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::HttpError(500)));
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = backend_for(&mock_server.uri()).sensors().await.unwrap_err();
    assert!(matches!(err, ApiError::ParseError(_)));
}

#[tokio::test]
async fn test_timeout_reported_with_configured_seconds() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ok"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(&BackendConfig {
        base_url: mock_server.uri(),
        timeout_seconds: Some(1),
        embed_url: None,
    })
    .unwrap();

    let err = backend.health().await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout(1)));
}

#[tokio::test]
async fn test_connection_refused() {
    let backend = backend_for("http://127.0.0.1:1");
    let err = backend.health().await.unwrap_err();
    assert!(matches!(err, ApiError::ConnectionFailed(_)));
}
