//! OpenAI-compatible provider implementation
//!
//! Completion client for any server exposing the OpenAI chat-completions
//! surface (Ollama, vLLM, LocalAI, and similar). The endpoint is user
//! configured, the credential is optional, the per-call deadline is
//! 60 seconds, and the request carries temperature, max-tokens and top-p
//! along with an explicit `stream: false`.

use crate::config::OpenAiCompatConfig;
use crate::error::{HeliochatError, Result};
use crate::providers::base::{
    classify_status, classify_transport, extract_content, ChatCompletionResponse,
};
use crate::providers::{ChatMessage, CompletionClient, CompletionError};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Completion client for a user-configured OpenAI-compatible endpoint
///
/// # Examples
///
/// ```no_run
/// use heliochat::config::OpenAiCompatConfig;
/// use heliochat::providers::{ChatMessage, CompletionClient, OpenAiCompatClient};
///
/// # async fn example() -> heliochat::error::Result<()> {
/// let config = OpenAiCompatConfig {
///     base_url: "http://localhost:11434/v1".to_string(),
///     model: "llama3.2".to_string(),
///     ..Default::default()
/// };
/// let client = OpenAiCompatClient::new(config)?;
/// let history = vec![ChatMessage::user("Hello!")];
/// let text = client.complete(&history).await;
/// # Ok(())
/// # }
/// ```
pub struct OpenAiCompatClient {
    client: Client,
    config: OpenAiCompatConfig,
}

/// Request body for an OpenAI-compatible chat-completions call
#[derive(Debug, Serialize)]
struct OpenAiCompatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    stream: bool,
}

impl OpenAiCompatClient {
    /// Create a new OpenAI-compatible client
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint base URL, optional credential, model and
    ///   generation parameters
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: OpenAiCompatConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("heliochat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                HeliochatError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized OpenAI-compatible client: base_url={}, model={}, timeout={}s",
            config.base_url,
            config.model,
            config.timeout_seconds
        );

        Ok(Self { client, config })
    }

    /// Completions endpoint derived from the configured base URL
    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompatClient {
    async fn complete(&self, history: &[ChatMessage]) -> std::result::Result<String, CompletionError> {
        let body = OpenAiCompatRequest {
            model: &self.config.model,
            messages: history,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
            stream: false,
        };

        tracing::debug!(
            "Sending completion request: {} messages, model={}, endpoint={}",
            history.len(),
            self.config.model,
            self.endpoint()
        );

        // Authorization is omitted entirely for unauthenticated servers.
        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("Completion request failed: {}", e);
            classify_transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Endpoint returned status {}", status);
            return Err(classify_status(status.as_u16()));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse completion response: {}", e);
            CompletionError::Unexpected(format!("failed to parse response: {}", e))
        })?;

        extract_content(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OpenAiCompatConfig {
        OpenAiCompatConfig {
            base_url: "http://localhost:11434/v1".to_string(),
            model: "llama3.2".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_client_creation() {
        assert!(OpenAiCompatClient::new(test_config()).is_ok());
    }

    #[test]
    fn test_endpoint_appends_path() {
        let client = OpenAiCompatClient::new(test_config()).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let config = OpenAiCompatConfig {
            base_url: "http://localhost:8000/v1/".to_string(),
            ..test_config()
        };
        let client = OpenAiCompatClient::new(config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000/v1/chat/completions");
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        let body = OpenAiCompatRequest {
            model: "llama3.2",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 1000,
            top_p: 0.9,
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3.2");
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
        assert_eq!(json["top_p"], 0.9);
        assert_eq!(json["stream"], false);
    }
}
