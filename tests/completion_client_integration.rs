//! End-to-end tests for the completion clients against a mock endpoint
//!
//! Covers the status decision table, the per-call deadline, request body
//! shape, credential header handling, and the bounded history window.

use std::time::{Duration, Instant};

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use heliochat::config::{GroqConfig, OpenAiCompatConfig};
use heliochat::providers::{
    ChatMessage, CompletionClient, CompletionError, GroqClient, OpenAiCompatClient,
};
use heliochat::session::{ConversationStore, Role};

fn compat_config(server: &MockServer) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        base_url: server.uri(),
        model: "llama3.2".to_string(),
        ..Default::default()
    }
}

fn success_body() -> Value {
    json!({"choices": [{"message": {"content": "hello"}}]})
}

#[tokio::test]
async fn test_success_returns_first_choice_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiCompatClient::new(compat_config(&server)).unwrap();
    let result = client.complete(&[ChatMessage::user("hi")]).await;

    assert_eq!(result.unwrap(), "hello");
}

#[tokio::test]
async fn test_401_maps_to_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let client = OpenAiCompatClient::new(compat_config(&server)).unwrap();
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();

    assert_eq!(err, CompletionError::InvalidCredentials);
    assert_eq!(err.to_string(), "Error: invalid API key.");
}

#[tokio::test]
async fn test_429_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = OpenAiCompatClient::new(compat_config(&server)).unwrap();
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();

    assert_eq!(err, CompletionError::RateLimited);
}

#[tokio::test]
async fn test_other_status_carries_numeric_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = OpenAiCompatClient::new(compat_config(&server)).unwrap();
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();

    assert_eq!(err, CompletionError::Status(503));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_timeout_fires_after_deadline_not_before() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = OpenAiCompatConfig {
        timeout_seconds: 1,
        ..compat_config(&server)
    };
    let client = OpenAiCompatClient::new(config).unwrap();

    let started = Instant::now();
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
    let elapsed = started.elapsed();

    assert_eq!(err, CompletionError::Timeout);
    assert!(elapsed >= Duration::from_secs(1), "fired before the deadline");
    assert!(elapsed < Duration::from_secs(5), "waited for the full delay");
}

#[tokio::test]
async fn test_unreachable_endpoint_maps_to_connection() {
    // Port 2 is privileged and never bound here, so connects are refused.
    let config = OpenAiCompatConfig {
        base_url: "http://127.0.0.1:2".to_string(),
        model: "llama3.2".to_string(),
        ..Default::default()
    };
    let client = OpenAiCompatClient::new(config).unwrap();
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();

    assert_eq!(err, CompletionError::Connection);
}

#[tokio::test]
async fn test_malformed_body_is_unexpected_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = OpenAiCompatClient::new(compat_config(&server)).unwrap();
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();

    assert!(matches!(err, CompletionError::Unexpected(_)));
}

#[tokio::test]
async fn test_empty_choices_is_unexpected_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = OpenAiCompatClient::new(compat_config(&server)).unwrap();
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();

    assert!(matches!(err, CompletionError::Unexpected(_)));
}

#[tokio::test]
async fn test_authorization_header_sent_when_key_configured() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = OpenAiCompatConfig {
        api_key: Some("sk-test".to_string()),
        ..compat_config(&server)
    };
    let client = OpenAiCompatClient::new(config).unwrap();

    assert!(client.complete(&[ChatMessage::user("hi")]).await.is_ok());
}

#[tokio::test]
async fn test_authorization_header_omitted_without_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiCompatClient::new(compat_config(&server)).unwrap();
    client.complete(&[ChatMessage::user("hi")]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let has_auth = requests[0]
        .headers
        .iter()
        .any(|(name, _)| name.as_str().eq_ignore_ascii_case("authorization"));
    assert!(!has_auth, "unauthenticated request must omit the header");
}

#[tokio::test]
async fn test_request_body_carries_generation_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .mount(&server)
        .await;

    let client = OpenAiCompatClient::new(compat_config(&server)).unwrap();
    client.complete(&[ChatMessage::user("hi")]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(body["model"], "llama3.2");
    assert_eq!(body["temperature"], 0.7);
    assert_eq!(body["max_tokens"], 1000);
    assert_eq!(body["top_p"], 0.9);
    assert_eq!(body["stream"], false);
}

#[tokio::test]
async fn test_window_limits_request_to_last_ten_turns() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .mount(&server)
        .await;

    // A 15-turn conversation: only the last 10 qualifying turns go out.
    let mut store = ConversationStore::new();
    for i in 0..15 {
        let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
        store.append(role, format!("turn {}", i));
    }

    let window = store.recent_window(10);
    let client = OpenAiCompatClient::new(compat_config(&server)).unwrap();
    client.complete(&window).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = body["messages"].as_array().unwrap();

    assert_eq!(messages.len(), 10);
    assert_eq!(messages[0]["content"], "turn 5");
    assert_eq!(messages[9]["content"], "turn 14");
}

#[tokio::test]
async fn test_groq_client_success_and_body_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = GroqConfig {
        api_key: Some("gsk_test".to_string()),
        api_base: Some(server.uri()),
        ..Default::default()
    };
    let client = GroqClient::new(config).unwrap();
    let result = client.complete(&[ChatMessage::user("hi")]).await;

    assert_eq!(result.unwrap(), "hello");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "openai/gpt-oss-20b");
    assert_eq!(body["max_tokens"], 1000);
    // The fixed-provider variant sends neither top_p nor stream.
    assert!(body.get("top_p").is_none());
    assert!(body.get("stream").is_none());
}

#[tokio::test]
async fn test_groq_client_401_diagnostic() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let config = GroqConfig {
        api_key: Some("gsk_bad".to_string()),
        api_base: Some(server.uri()),
        ..Default::default()
    };
    let client = GroqClient::new(config).unwrap();
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();

    assert_eq!(err, CompletionError::InvalidCredentials);
}

#[tokio::test]
async fn test_groq_unreachable_maps_to_connection() {
    // Unified taxonomy: the fixed-provider variant reports connection
    // failures distinctly instead of folding them into the catch-all.
    let config = GroqConfig {
        api_key: Some("gsk_test".to_string()),
        api_base: Some("http://127.0.0.1:2".to_string()),
        ..Default::default()
    };
    let client = GroqClient::new(config).unwrap();
    let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();

    assert_eq!(err, CompletionError::Connection);
}
