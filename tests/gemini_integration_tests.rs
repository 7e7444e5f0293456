use std::sync::Arc;

use hasan::core::action::{Action, Effect, update};
use hasan::core::state::App;
use hasan::inference::{
    AnswerFetcher, CONNECTION_FAILURE_TEXT, FetchOutcome, GeminiProvider, GenerationConfig,
    NO_ANSWER_TEXT, ProviderError,
};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

const MODEL: &str = "test-model";
const ENDPOINT: &str = "/models/test-model:generateContent";

fn provider_for(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new("test-key".to_string(), Some(server.uri())).with_model(MODEL)
}

fn answer_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}

// ============================================================================
// Request Shape
// ============================================================================

#[tokio::test]
async fn test_request_carries_prompt_key_and_generation_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "What is the answer?" }] }],
            "generationConfig": { "temperature": 0.7, "maxOutputTokens": 500, "topP": 0.8 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("42")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let answer = provider.fetch_answer("What is the answer?").await;

    assert_eq!(assert_ok!(answer), "42");
}

#[tokio::test]
async fn test_configured_generation_settings_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(json!({
            "generationConfig": { "temperature": 0.2, "maxOutputTokens": 64, "topP": 0.5 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("ok")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server).with_generation_config(GenerationConfig {
        temperature: 0.2,
        max_output_tokens: 64,
        top_p: 0.5,
    });

    assert_eq!(provider.fetch_text("hi").await, "ok");
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("ok")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::new("k".to_string(), Some(format!("{}/", mock_server.uri())))
        .with_model(MODEL);

    assert_eq!(provider.fetch_text("hi").await, "ok");
}

// ============================================================================
// Outcomes
// ============================================================================

#[tokio::test]
async fn test_only_first_part_of_first_candidate_is_used() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "other candidate" }] } }
            ]
        })))
        .mount(&mock_server)
        .await;

    let outcome = provider_for(&mock_server).fetch_outcome("hi").await;
    assert_eq!(outcome, FetchOutcome::Answer("first".to_string()));
}

#[tokio::test]
async fn test_empty_candidates_yield_no_answer_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    assert_eq!(provider.fetch_outcome("hi").await, FetchOutcome::NoAnswerProduced);
    assert_eq!(assert_ok!(provider.fetch_answer("hi").await), NO_ANSWER_TEXT);
}

#[tokio::test]
async fn test_missing_candidates_field_yields_no_answer_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&mock_server)
        .await;

    assert_eq!(provider_for(&mock_server).fetch_text("hi").await, NO_ANSWER_TEXT);
}

#[tokio::test]
async fn test_null_candidates_yield_no_answer_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": null } }, null]
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    assert_eq!(provider.fetch_outcome("hi").await, FetchOutcome::NoAnswerProduced);
    assert_eq!(provider.fetch_text("hi").await, NO_ANSWER_TEXT);
}

#[tokio::test]
async fn test_server_error_yields_connection_failure_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);

    let err = assert_err!(provider.generate("hi").await);
    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }

    assert_eq!(provider.fetch_outcome("hi").await, FetchOutcome::ConnectionFailure);
    assert_eq!(
        assert_ok!(provider.fetch_answer("hi").await),
        CONNECTION_FAILURE_TEXT
    );
}

#[tokio::test]
async fn test_unauthorized_yields_connection_failure_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" }
        })))
        .mount(&mock_server)
        .await;

    assert_eq!(
        provider_for(&mock_server).fetch_text("hi").await,
        CONNECTION_FAILURE_TEXT
    );
}

#[tokio::test]
async fn test_malformed_json_yields_connection_failure_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);

    let err = assert_err!(provider.generate("hi").await);
    assert!(matches!(err, ProviderError::Parse(_)), "got {:?}", err);
    assert_eq!(provider.fetch_text("hi").await, CONNECTION_FAILURE_TEXT);
}

#[tokio::test]
async fn test_unreachable_host_yields_connection_failure_text() {
    // Port 1 on loopback refuses connections.
    let provider = GeminiProvider::new("k".to_string(), Some("http://127.0.0.1:1".to_string()))
        .with_model(MODEL);

    let err = assert_err!(provider.generate("hi").await);
    assert!(matches!(err, ProviderError::Network(_)), "got {:?}", err);
    assert_eq!(provider.fetch_outcome("hi").await, FetchOutcome::ConnectionFailure);
}

// ============================================================================
// Conversation Flow
// ============================================================================

/// Drives one send through the reducer with the real fetcher, the way the
/// event loop does, and returns the settled app.
async fn send_through_app(provider: GeminiProvider, prompt: &str) -> App {
    let mut app = App::new(Arc::new(provider), MODEL.to_string());
    update(&mut app, Action::Mount);

    let (prompt, placeholder_id) = match update(&mut app, Action::Submit(prompt.to_string())) {
        Effect::SpawnFetch {
            prompt,
            placeholder_id,
        } => (prompt, placeholder_id),
        other => panic!("Expected SpawnFetch, got {:?}", other),
    };
    assert!(app.is_loading);

    let answer = assert_ok!(app.fetcher.fetch_answer(&prompt).await);
    update(
        &mut app,
        Action::AnswerReady {
            placeholder_id,
            answer,
        },
    );
    app
}

#[tokio::test]
async fn test_http_error_settles_conversation_with_connection_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let app = send_through_app(provider_for(&mock_server), "Hi").await;

    let last = app.conversation.last().unwrap();
    assert_eq!(last.text, CONNECTION_FAILURE_TEXT);
    assert!(!last.is_user);
    assert_eq!(app.conversation.thinking_count(), 0);
    assert!(!app.is_loading);
}

#[tokio::test]
async fn test_answer_settles_conversation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("42")))
        .mount(&mock_server)
        .await;

    let app = send_through_app(provider_for(&mock_server), "What is the answer?").await;

    let texts: Vec<&str> = app.conversation.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts[1..], ["What is the answer?", "42"]);
    assert_eq!(app.conversation.thinking_count(), 0);
    assert!(!app.is_loading);
}
