//! Heliochat - chat client CLI
//!
//! Main entry point for the Heliochat application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use heliochat::cli::{Cli, Commands};
use heliochat::commands;
use heliochat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path)?;

    // Execute command; each handler re-validates after applying its
    // provider override so a bad override fails the same way a bad
    // config file does.
    match cli.command {
        Commands::Chat { provider } => {
            tracing::info!("Starting interactive chat session");
            if let Some(p) = &provider {
                tracing::debug!("Using provider override: {}", p);
            }
            commands::chat::run_chat(config, provider).await?;
            Ok(())
        }
        Commands::Check { provider } => {
            tracing::info!("Starting connection check");
            commands::check::run_check(config, provider).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "heliochat=debug"
    } else {
        "heliochat=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
