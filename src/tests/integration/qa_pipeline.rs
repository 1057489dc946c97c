//! Q&A Pipeline Integration Tests

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::AppConfig;
use crate::core::document::PdfExtractor;
use crate::core::llm::{LlmError, OllamaClient};
use crate::core::prompt::{PromptBuilder, DEFAULT_MAX_CONTEXT_CHARS};
use crate::core::qa::answer_question;
use crate::tests::common::*;
use crate::tui::events::AppEvent;
use crate::tui::services::Services;

async fn mock_generate(server: &MockServer, answer: &str) {
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": answer })))
        .mount(server)
        .await;
}

/// The prompt of the single generate request the server received.
async fn received_prompt(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    body["prompt"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_pdf_to_answer() {
    let server = MockServer::start().await;
    mock_generate(&server, "Revenue grew.").await;

    let file = create_two_page_pdf();
    let document = PdfExtractor::extract(file.path()).unwrap();
    let client = OllamaClient::new(server.uri());

    let answer = answer_question(
        &client,
        "llama2",
        &document,
        "What happened to revenue?",
        PromptBuilder::default(),
    )
    .await
    .unwrap();
    assert_eq!(answer, "Revenue grew.");

    let prompt = received_prompt(&server).await;
    assert!(prompt.contains("--- Page 1 ---"));
    assert!(prompt.contains("Quarterly revenue grew"));
    assert!(prompt.contains("QUESTION: What happened to revenue?"));
}

#[tokio::test]
async fn test_long_document_truncated_in_prompt() {
    let server = MockServer::start().await;
    mock_generate(&server, "ok").await;

    let long_page = "lorem ipsum ".repeat(1200);
    let file = create_pdf(&[&long_page, "TAIL MARKER"]);
    let document = PdfExtractor::extract(file.path()).unwrap();
    assert!(document.char_count() > DEFAULT_MAX_CONTEXT_CHARS);

    let client = OllamaClient::new(server.uri());
    answer_question(&client, "llama2", &document, "Q?", PromptBuilder::default())
        .await
        .unwrap();

    let prompt = received_prompt(&server).await;
    let segment = prompt
        .split("DOCUMENT CONTENT:\n")
        .nth(1)
        .and_then(|rest| rest.split("\n\nQUESTION: ").next())
        .unwrap();
    assert_eq!(segment.chars().count(), DEFAULT_MAX_CONTEXT_CHARS);
    assert!(!prompt.contains("TAIL MARKER"));
}

#[tokio::test]
async fn test_pipeline_surfaces_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let file = create_two_page_pdf();
    let document = PdfExtractor::extract(file.path()).unwrap();
    let client = OllamaClient::new(server.uri());

    let err = answer_question(&client, "llama2", &document, "Q?", PromptBuilder::default())
        .await
        .unwrap_err();
    assert_eq!(err, LlmError::Api { status: 500 });
}

// =============================================================================
// Background services
// =============================================================================

fn services_for(server: &MockServer) -> (Services, mpsc::UnboundedReceiver<AppEvent>) {
    let mut config = AppConfig::default();
    config.ollama.base_url = server.uri();
    let (tx, rx) = mpsc::unbounded_channel();
    (Services::new(&config, tx), rx)
}

async fn next_event(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> AppEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("event within timeout")
        .expect("channel open")
}

#[tokio::test]
async fn test_services_extraction_event() {
    let server = MockServer::start().await;
    let (services, mut rx) = services_for(&server);

    let file = create_pdf_with_blank_page();
    services.start_extraction(file.path().to_path_buf());

    match next_event(&mut rx).await {
        AppEvent::DocumentLoaded(doc) => {
            assert_eq!(doc.page_count(), 3);
            assert_eq!(doc.missing_pages(), 1);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_services_extraction_failure_event() {
    let server = MockServer::start().await;
    let (services, mut rx) = services_for(&server);

    let file = create_malformed_pdf();
    services.start_extraction(file.path().to_path_buf());

    assert!(matches!(
        next_event(&mut rx).await,
        AppEvent::DocumentFailed(_)
    ));
}

#[tokio::test]
async fn test_services_answer_event() {
    let server = MockServer::start().await;
    mock_generate(&server, "42").await;
    let (services, mut rx) = services_for(&server);

    let file = create_two_page_pdf();
    let document = Arc::new(PdfExtractor::extract(file.path()).unwrap());
    services.start_answer("llama2".into(), document, "Q?".into());

    assert!(matches!(
        next_event(&mut rx).await,
        AppEvent::AnswerReady(ref a) if a == "42"
    ));
}

#[tokio::test]
async fn test_services_probe_event() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "models": [{ "name": "phi3" }] })),
        )
        .mount(&server)
        .await;
    let (services, mut rx) = services_for(&server);

    services.start_probe();

    match next_event(&mut rx).await {
        AppEvent::ModelsProbed(probe) => assert_eq!(probe.models(), ["phi3".to_string()]),
        other => panic!("unexpected event: {other:?}"),
    }
}
