//! Base completion client trait and shared wire types
//!
//! This module defines the [`CompletionClient`] trait implemented by all
//! provider variants, the `{role, content}` wire message, the unified
//! completion-error taxonomy, and the status/transport decision tables
//! shared by every client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One `{role, content}` pair as sent to the provider
///
/// Derived from the session's recent window; content is already trimmed
/// and non-empty by the time a message reaches a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender ("user" or "assistant")
    pub role: String,
    /// Trimmed message content
    pub content: String,
}

impl ChatMessage {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use heliochat::providers::ChatMessage;
    ///
    /// let msg = ChatMessage::user("Hello!");
    /// assert_eq!(msg.role, "user");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Unified taxonomy of completion failures
///
/// Every failure mode of a completion call maps to exactly one variant.
/// The `Display` of each variant is the fixed user-facing diagnostic; the
/// chat loop appends it to the transcript as a normal assistant turn, so
/// no variant ever propagates as an application error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// The provider rejected the credential (HTTP 401)
    #[error("Error: invalid API key.")]
    InvalidCredentials,

    /// Provider-side throttling (HTTP 429)
    #[error("Rate limit exceeded. Try again in a few minutes.")]
    RateLimited,

    /// Any other non-success HTTP status, carrying the numeric code
    #[error("Provider returned error {0}.")]
    Status(u16),

    /// No response within the per-call deadline
    #[error("The request timed out before the provider responded.")]
    Timeout,

    /// The endpoint was unreachable
    #[error("Connection error. Check that the endpoint is reachable.")]
    Connection,

    /// Malformed response shape or any other failure, with a short detail
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Client for a chat-completions HTTP endpoint
///
/// Each call performs exactly one request and translates the outcome into
/// either generated text or a [`CompletionError`]. Clients hold no
/// cross-call state beyond their configuration and never retry.
///
/// # Examples
///
/// ```no_run
/// use heliochat::providers::{ChatMessage, CompletionClient, CompletionError};
/// use async_trait::async_trait;
///
/// struct EchoClient;
///
/// #[async_trait]
/// impl CompletionClient for EchoClient {
///     async fn complete(
///         &self,
///         history: &[ChatMessage],
///     ) -> Result<String, CompletionError> {
///         Ok(history.last().map(|m| m.content.clone()).unwrap_or_default())
///     }
/// }
/// ```
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends the history to the provider and returns the generated text
    ///
    /// # Arguments
    ///
    /// * `history` - Non-empty bounded window of `{role, content}` pairs;
    ///   callers must not invoke this with an empty history
    ///
    /// # Errors
    ///
    /// Returns a [`CompletionError`] whose `Display` is the diagnostic to
    /// show in the transcript. Implementations catch every failure mode
    /// at this boundary; nothing panics or escapes as another error type.
    async fn complete(&self, history: &[ChatMessage]) -> Result<String, CompletionError>;
}

/// Response body of a successful chat-completions call
///
/// Only `choices[0].message.content` is extracted; all other fields are
/// ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    pub content: String,
}

/// Maps a non-success HTTP status to its taxonomy variant
///
/// This is the flat decision table shared by both provider variants;
/// 200 never reaches it.
pub(crate) fn classify_status(code: u16) -> CompletionError {
    match code {
        401 => CompletionError::InvalidCredentials,
        429 => CompletionError::RateLimited,
        other => CompletionError::Status(other),
    }
}

/// Maps a transport-level reqwest failure to its taxonomy variant
pub(crate) fn classify_transport(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else if err.is_connect() {
        CompletionError::Connection
    } else {
        CompletionError::Unexpected(err.to_string())
    }
}

/// Extracts the first choice's message content from a response body
///
/// A body that parses but lacks a first choice is a hard failure, not a
/// silently-empty completion.
pub(crate) fn extract_content(
    body: ChatCompletionResponse,
) -> Result<String, CompletionError> {
    body.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| CompletionError::Unexpected("response contained no choices".to_string()))
}
