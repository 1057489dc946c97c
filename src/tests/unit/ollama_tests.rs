//! Ollama Client Unit Tests
//!
//! Tests the generate call and the model registry probe against a
//! wiremock server:
//! - Request body shape
//! - Response parsing and the missing-field fallback
//! - Status, timeout and decode error mapping
//! - Registry listing and unreachable handling

use std::time::Duration;

use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::llm::ollama::FALLBACK_RESPONSE;
use crate::core::llm::{LlmError, ModelProbe, OllamaClient};

// =============================================================================
// Generate
// =============================================================================

#[tokio::test]
async fn test_generate_returns_response_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama2",
            "response": "42",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let answer = client.generate("llama2", "What is the answer?").await.unwrap();
    assert_eq!(answer, "42");
}

#[tokio::test]
async fn test_generate_sends_non_streaming_options() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "mistral",
            "prompt": "hello",
            "stream": false,
            "options": { "temperature": 0.1, "top_p": 0.9, "num_predict": 500 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    assert_eq!(client.generate("mistral", "hello").await.unwrap(), "ok");
}

#[tokio::test]
async fn test_generate_missing_response_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": true })))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let answer = client.generate("llama2", "q").await.unwrap();
    assert_eq!(answer, FALLBACK_RESPONSE);
}

#[rstest]
#[case(500)]
#[case(404)]
#[case(503)]
#[tokio::test]
async fn test_generate_non_200_is_api_error(#[case] status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(status).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let err = client.generate("llama2", "q").await.unwrap_err();
    assert_eq!(err, LlmError::Api { status });
    assert_eq!(err.user_message(), format!("API Error: {status}"));
}

#[tokio::test]
async fn test_generate_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "late" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client =
        OllamaClient::new(server.uri()).with_generate_timeout(Duration::from_millis(200));
    let err = client.generate("llama2", "q").await.unwrap_err();
    assert_eq!(err, LlmError::Timeout);
}

#[tokio::test]
async fn test_generate_non_json_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let err = client.generate("llama2", "q").await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_generate_connection_refused() {
    // Bind then drop to get a port nothing listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = OllamaClient::new(format!("http://127.0.0.1:{port}"));
    let err = client.generate("llama2", "q").await.unwrap_err();
    assert!(matches!(err, LlmError::Connection(_)));
    assert!(err.user_message().starts_with("Error: "));
}

// =============================================================================
// Model Registry Probe
// =============================================================================

#[tokio::test]
async fn test_list_models_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                { "name": "mistral:latest", "size": 4109865159u64 },
                { "name": "llama2:7b", "size": 3826793677u64 }
            ]
        })))
        .mount(&server)
        .await;

    let probe = OllamaClient::new(server.uri()).list_models().await;
    assert_eq!(
        probe,
        ModelProbe::Reachable(vec!["mistral:latest".into(), "llama2:7b".into()])
    );
}

#[tokio::test]
async fn test_list_models_missing_field_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let probe = OllamaClient::new(server.uri()).list_models().await;
    assert_eq!(probe, ModelProbe::Reachable(Vec::new()));
}

#[tokio::test]
async fn test_list_models_non_200_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let probe = OllamaClient::new(server.uri()).list_models().await;
    assert!(!probe.is_reachable());
    assert!(probe.models().is_empty());
}

#[tokio::test]
async fn test_list_models_unreachable_server() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let probe = OllamaClient::new(format!("http://127.0.0.1:{port}"))
        .list_models()
        .await;
    assert!(matches!(probe, ModelProbe::Unreachable(_)));
    assert!(probe.models().is_empty());
}

#[tokio::test]
async fn test_list_models_probe_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "models": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let probe = OllamaClient::new(server.uri())
        .with_probe_timeout(Duration::from_millis(200))
        .list_models()
        .await;
    assert!(!probe.is_reachable());
}
