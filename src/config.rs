//! Configuration management for Heliochat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files and environment variables.

use crate::error::{HeliochatError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main configuration structure for Heliochat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration (Groq, OpenAI-compatible)
    pub provider: ProviderSettings,

    /// Chat session settings
    #[serde(default)]
    pub chat: ChatSettings,
}

/// Provider configuration
///
/// Specifies which completion provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Type of provider to use
    #[serde(rename = "type")]
    pub provider_type: String,

    /// Hosted Groq endpoint configuration
    #[serde(default)]
    pub groq: GroqConfig,

    /// User-configured OpenAI-compatible endpoint configuration
    #[serde(default)]
    pub openai_compat: OpenAiCompatConfig,
}

/// Hosted Groq provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    /// Bearer credential; usually supplied via the GROQ_API_KEY
    /// environment variable rather than the config file
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to request
    #[serde(default = "default_groq_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum output tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-call deadline in seconds; no retry, no mid-flight cancellation
    #[serde(default = "default_groq_timeout")]
    pub timeout_seconds: u64,

    /// Optional API base URL override (useful for tests and local mocks)
    ///
    /// When set, the completions endpoint is built as
    /// `<api_base>/chat/completions` instead of the hosted Groq URL.
    #[serde(default)]
    pub api_base: Option<String>,
}

fn default_groq_model() -> String {
    "openai/gpt-oss-20b".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_groq_timeout() -> u64 {
    30
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_groq_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_groq_timeout(),
            api_base: None,
        }
    }
}

/// OpenAI-compatible provider configuration (Ollama, vLLM, LocalAI, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiCompatConfig {
    /// Base URL of the endpoint, e.g. `http://localhost:11434/v1`
    #[serde(default)]
    pub base_url: String,

    /// Optional bearer credential; the Authorization header is omitted
    /// entirely when absent
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to request
    #[serde(default)]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum output tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Nucleus-sampling top-p
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Per-call deadline in seconds
    #[serde(default = "default_openai_timeout")]
    pub timeout_seconds: u64,
}

fn default_top_p() -> f64 {
    0.9
}

fn default_openai_timeout() -> u64 {
    60
}

impl Default for OpenAiCompatConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            model: String::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            timeout_seconds: default_openai_timeout(),
        }
    }
}

/// Chat session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Number of most-recent turns included in each completion request
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Reserved keyword intercepted by the chat loop instead of being
    /// sent as chat content (trimmed, case-insensitive match)
    #[serde(default = "default_report_keyword")]
    pub report_keyword: String,
}

fn default_history_window() -> usize {
    crate::session::DEFAULT_WINDOW
}

fn default_report_keyword() -> String {
    "report".to_string()
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            report_keyword: default_report_keyword(),
        }
    }
}

impl Config {
    /// Load configuration from a file with environment overrides applied
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration; a missing file is not
    /// an error and falls back to defaults with a warning
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default_config()
        };

        config.apply_env_vars();

        Ok(config)
    }

    fn default_config() -> Self {
        Self {
            provider: ProviderSettings {
                provider_type: "groq".to_string(),
                groq: GroqConfig::default(),
                openai_compat: OpenAiCompatConfig::default(),
            },
            chat: ChatSettings::default(),
        }
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| HeliochatError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| HeliochatError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("HELIOCHAT_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(api_key) = std::env::var("GROQ_API_KEY") {
            if !api_key.is_empty() {
                self.provider.groq.api_key = Some(api_key);
            }
        }

        if let Ok(base_url) = std::env::var("HELIOCHAT_OPENAI_BASE_URL") {
            self.provider.openai_compat.base_url = base_url;
        }

        if let Ok(model) = std::env::var("HELIOCHAT_OPENAI_MODEL") {
            self.provider.openai_compat.model = model;
        }

        if let Ok(api_key) = std::env::var("HELIOCHAT_OPENAI_API_KEY") {
            if !api_key.is_empty() {
                self.provider.openai_compat.api_key = Some(api_key);
            }
        }
    }

    /// Validate the configuration before any client is constructed
    ///
    /// These are the pre-flight checks for missing or malformed values; a
    /// failure here is a configuration warning reported to the user, not
    /// a completion-client error.
    ///
    /// # Errors
    ///
    /// Returns error if the provider type is unknown, the Groq credential
    /// is missing, or the OpenAI-compatible endpoint/model is absent or
    /// malformed
    pub fn validate(&self) -> Result<()> {
        match self.provider.provider_type.as_str() {
            "groq" => {
                if self
                    .provider
                    .groq
                    .api_key
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .is_empty()
                {
                    return Err(HeliochatError::Config(
                        "Groq API key is not configured; set GROQ_API_KEY".to_string(),
                    )
                    .into());
                }
            }
            "openai_compat" => {
                let cfg = &self.provider.openai_compat;
                if cfg.base_url.trim().is_empty() {
                    return Err(HeliochatError::Config(
                        "OpenAI-compatible base URL is not configured".to_string(),
                    )
                    .into());
                }
                if Url::parse(cfg.base_url.trim()).is_err() {
                    return Err(HeliochatError::Config(format!(
                        "Invalid base URL: {}",
                        cfg.base_url
                    ))
                    .into());
                }
                if cfg.model.trim().is_empty() {
                    return Err(HeliochatError::Config(
                        "Model name is not configured".to_string(),
                    )
                    .into());
                }
            }
            other => {
                return Err(HeliochatError::Config(format!(
                    "Unknown provider type: {} (expected groq or openai_compat)",
                    other
                ))
                .into());
            }
        }

        if self.chat.history_window == 0 {
            return Err(
                HeliochatError::Config("history_window must be at least 1".to_string()).into(),
            );
        }

        Ok(())
    }
}
