//! Groq provider implementation
//!
//! Fixed-endpoint completion client for the hosted Groq chat-completions
//! API. Uses a 30-second per-call deadline and sends temperature and
//! max-tokens generation parameters; the credential is required in
//! practice and is validated up front by the configuration layer.

use crate::config::GroqConfig;
use crate::error::{HeliochatError, Result};
use crate::providers::base::{
    classify_status, classify_transport, extract_content, ChatCompletionResponse,
};
use crate::providers::{ChatMessage, CompletionClient, CompletionError};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Hosted Groq chat-completions endpoint
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Completion client for the hosted Groq API
///
/// # Examples
///
/// ```no_run
/// use heliochat::config::GroqConfig;
/// use heliochat::providers::{ChatMessage, CompletionClient, GroqClient};
///
/// # async fn example() -> heliochat::error::Result<()> {
/// let config = GroqConfig {
///     api_key: Some("gsk_test".to_string()),
///     ..Default::default()
/// };
/// let client = GroqClient::new(config)?;
/// let history = vec![ChatMessage::user("Hello!")];
/// let text = client.complete(&history).await;
/// # Ok(())
/// # }
/// ```
pub struct GroqClient {
    client: Client,
    config: GroqConfig,
}

/// Request body for the Groq chat-completions call
#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

impl GroqClient {
    /// Create a new Groq client
    ///
    /// # Arguments
    ///
    /// * `config` - Groq configuration (credential, model, generation
    ///   parameters, per-call deadline)
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: GroqConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("heliochat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                HeliochatError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized Groq client: model={}, timeout={}s",
            config.model,
            config.timeout_seconds
        );

        Ok(Self { client, config })
    }

    /// Endpoint URL, honoring the test override when set
    fn endpoint(&self) -> String {
        self.config
            .api_base
            .as_ref()
            .map(|base| format!("{}/chat/completions", base.trim_end_matches('/')))
            .unwrap_or_else(|| GROQ_API_URL.to_string())
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, history: &[ChatMessage]) -> std::result::Result<String, CompletionError> {
        let body = GroqRequest {
            model: &self.config.model,
            messages: history,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            "Sending Groq request: {} messages, model={}",
            history.len(),
            self.config.model
        );

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("Groq request failed: {}", e);
            classify_transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Groq returned status {}", status);
            return Err(classify_status(status.as_u16()));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Groq response: {}", e);
            CompletionError::Unexpected(format!("failed to parse response: {}", e))
        })?;

        extract_content(parsed)
    }
}
