//! Heliochat - chat client library for OpenAI-compatible endpoints
//!
//! This library provides the core functionality for the Heliochat CLI:
//! session history management, completion clients for the supported
//! provider variants, and configuration handling.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Append-only conversation log and the bounded request window
//! - `providers`: Completion-client abstraction and implementations (Groq, OpenAI-compatible)
//! - `commands`: Interactive chat loop and connection probe
//! - `config`: Configuration management and pre-flight validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use heliochat::config::Config;
//! use heliochat::providers::create_client;
//! use heliochat::session::{ConversationStore, Role};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load("config/config.yaml")?;
//! config.validate()?;
//!
//! let client = create_client(&config.provider)?;
//! let mut store = ConversationStore::new();
//! store.append(Role::User, "How much did the array produce today?");
//!
//! let window = store.recent_window(config.chat.history_window);
//! let outcome = match client.complete(&window).await {
//!     Ok(text) => text,
//!     Err(diagnostic) => diagnostic.to_string(),
//! };
//! store.append(Role::Assistant, outcome);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{HeliochatError, Result};
pub use providers::{ChatMessage, CompletionClient, CompletionError};
pub use session::{ConversationStore, Role, Turn};
