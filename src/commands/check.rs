//! Connection probe
//!
//! Sends a single short message to the configured endpoint and reports
//! whether it answers, reusing the normal completion path so the probe
//! exercises the same status mapping the chat session would see.

use crate::config::Config;
use crate::error::Result;
use crate::providers::{self, ChatMessage};

use colored::Colorize;

/// Run the connection check
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `provider_override` - Optional provider type override from the CLI
///
/// # Errors
///
/// Returns error if configuration validation or client construction
/// fails. A failing probe is reported on stdout, not as an error.
pub async fn run_check(mut config: Config, provider_override: Option<String>) -> Result<()> {
    if let Some(provider_type) = provider_override {
        config.provider.provider_type = provider_type;
    }
    config.validate()?;

    let client = providers::create_client(&config.provider)?;
    let probe = vec![ChatMessage::user("hello")];

    println!(
        "Checking {} endpoint...",
        config.provider.provider_type.bold()
    );

    match client.complete(&probe).await {
        Ok(_) => {
            println!("{}", "Connection OK.".green());
        }
        Err(e) => {
            println!("{}", e.to_string().red());
        }
    }

    Ok(())
}
