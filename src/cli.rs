//! Command-line interface definition for Heliochat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat and connection checking.

use clap::{Parser, Subcommand};

/// Heliochat - chat client for OpenAI-compatible completion endpoints
///
/// Keeps a per-session conversation log and forwards a bounded window of
/// recent turns to a hosted Groq endpoint or any OpenAI-compatible server.
#[derive(Parser, Debug, Clone)]
#[command(name = "heliochat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Heliochat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Override the provider from config (groq, openai_compat)
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Send a one-message probe and report whether the endpoint answers
    Check {
        /// Override the provider from config (groq, openai_compat)
        #[arg(short, long)]
        provider: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
