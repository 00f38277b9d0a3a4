//! Error types for Heliochat
//!
//! This module defines the application-level error type used throughout
//! the crate, using `thiserror` for ergonomic error handling.
//!
//! Completion outcomes surfaced to the user as chat text are NOT
//! represented here; see [`crate::providers::CompletionError`], which is
//! a result value folded into the transcript, never a propagated failure.

use thiserror::Error;

/// Main error type for Heliochat operations
///
/// This enum encompasses all errors that can occur during configuration
/// loading, client construction, and command execution.
#[derive(Error, Debug)]
pub enum HeliochatError {
    /// Configuration-related errors (missing file, bad values, pre-flight
    /// validation failures such as a missing endpoint or model)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (client construction, unknown provider type)
    #[error("Provider error: {0}")]
    Provider(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Heliochat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = HeliochatError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_provider_error_display() {
        let error = HeliochatError::Provider("unknown provider type".to_string());
        assert_eq!(error.to_string(), "Provider error: unknown provider type");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: HeliochatError = io_error.into();
        assert!(matches!(error, HeliochatError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: HeliochatError = json_error.into();
        assert!(matches!(error, HeliochatError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: HeliochatError = yaml_error.into();
        assert!(matches!(error, HeliochatError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HeliochatError>();
    }
}
