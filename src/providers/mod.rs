//! Provider module for Heliochat
//!
//! This module contains the completion-client abstraction and the two
//! provider variants: the hosted Groq endpoint and user-configured
//! OpenAI-compatible servers.

pub mod base;
pub mod groq;
pub mod openai_compat;

pub use base::{ChatMessage, CompletionClient, CompletionError};
pub use groq::GroqClient;
pub use openai_compat::OpenAiCompatClient;

use crate::config::ProviderSettings;
use crate::error::Result;

/// Create a completion client based on configuration
///
/// # Arguments
///
/// * `settings` - Provider settings; `provider_type` selects the variant
///   ("groq" or "openai_compat")
///
/// # Returns
///
/// Returns a boxed client instance
///
/// # Errors
///
/// Returns error if the provider type is unknown or client
/// initialization fails
pub fn create_client(settings: &ProviderSettings) -> Result<Box<dyn CompletionClient>> {
    match settings.provider_type.as_str() {
        "groq" => Ok(Box::new(GroqClient::new(settings.groq.clone())?)),
        "openai_compat" => Ok(Box::new(OpenAiCompatClient::new(
            settings.openai_compat.clone(),
        )?)),
        other => Err(crate::error::HeliochatError::Provider(format!(
            "Unknown provider type: {}",
            other
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GroqConfig, OpenAiCompatConfig};

    #[test]
    fn test_create_client_groq() {
        let settings = ProviderSettings {
            provider_type: "groq".to_string(),
            groq: GroqConfig::default(),
            openai_compat: OpenAiCompatConfig::default(),
        };
        assert!(create_client(&settings).is_ok());
    }

    #[test]
    fn test_create_client_openai_compat() {
        let settings = ProviderSettings {
            provider_type: "openai_compat".to_string(),
            groq: GroqConfig::default(),
            openai_compat: OpenAiCompatConfig {
                base_url: "http://localhost:11434/v1".to_string(),
                model: "llama3.2".to_string(),
                ..Default::default()
            },
        };
        assert!(create_client(&settings).is_ok());
    }

    #[test]
    fn test_create_client_invalid_type() {
        let settings = ProviderSettings {
            provider_type: "invalid".to_string(),
            groq: GroqConfig::default(),
            openai_compat: OpenAiCompatConfig::default(),
        };
        assert!(create_client(&settings).is_err());
    }
}
