//! Interactive chat session
//!
//! This module runs the read/complete/append loop: each input line is
//! appended to the session store as a user turn, the bounded recent
//! window is sent to the configured provider, and the outcome — success
//! text or diagnostic — is appended back as an assistant turn and
//! printed. One request is outstanding at a time; the loop blocks on it.
//!
//! Two kinds of input never reach the provider: the reserved report
//! keyword (trimmed, case-insensitive), which in the original dashboard
//! navigated to the analytics page, and `/`-prefixed session commands.

use crate::config::Config;
use crate::error::Result;
use crate::providers;
use crate::session::{ConversationStore, Role, Turn};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;

/// Errors that can occur when parsing session commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),
}

/// Session commands that can be entered during interactive chat
///
/// These modify session state or print information rather than being
/// sent to the provider. Commands are prefixed with `/` and are
/// case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Discard the whole conversation and start fresh
    Clear,
    /// Print the full transcript with timestamps
    History,
    /// Display help information
    Help,
    /// Exit the session
    Quit,
}

/// Parses a `/`-prefixed session command
///
/// Returns `None` for input that is not a command (and should be treated
/// as chat content).
pub fn parse_session_command(input: &str) -> Option<std::result::Result<SessionCommand, CommandError>> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    Some(match trimmed.to_lowercase().as_str() {
        "/clear" => Ok(SessionCommand::Clear),
        "/history" => Ok(SessionCommand::History),
        "/help" => Ok(SessionCommand::Help),
        "/quit" | "/exit" => Ok(SessionCommand::Quit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    })
}

/// Returns true if the input matches the reserved report keyword
///
/// The match is on trimmed, lowercased equality, so surrounding
/// whitespace and casing never defeat the interception.
pub fn is_report_keyword(input: &str, keyword: &str) -> bool {
    input.trim().to_lowercase() == keyword.trim().to_lowercase()
}

/// Run the interactive chat session
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `provider_override` - Optional provider type override from the CLI
///
/// # Errors
///
/// Returns error if the provider cannot be constructed or the terminal
/// cannot be read. Completion failures are NOT errors here; they become
/// assistant turns in the transcript.
pub async fn run_chat(mut config: Config, provider_override: Option<String>) -> Result<()> {
    if let Some(provider_type) = provider_override {
        config.provider.provider_type = provider_type;
    }
    config.validate()?;

    let client = providers::create_client(&config.provider)?;
    let mut store = ConversationStore::new();
    let mut editor = DefaultEditor::new()?;

    println!("{}", "Heliochat — at your service.".bold());
    println!(
        "Type a message and press Enter. '/help' lists commands; '{}' opens the dashboard report.",
        config.chat.report_keyword
    );

    loop {
        let line = match editor.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Goodbye.");
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if line.trim().is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(&line);

        if is_report_keyword(&line, &config.chat.report_keyword) {
            println!(
                "{}",
                "The production report lives in the analytics dashboard, not in this session."
                    .yellow()
            );
            continue;
        }

        match parse_session_command(&line) {
            Some(Ok(SessionCommand::Clear)) => {
                store.clear();
                println!("{}", "Conversation cleared.".yellow());
                continue;
            }
            Some(Ok(SessionCommand::History)) => {
                print_transcript(&store);
                continue;
            }
            Some(Ok(SessionCommand::Help)) => {
                print_help();
                continue;
            }
            Some(Ok(SessionCommand::Quit)) => {
                println!("Goodbye.");
                break;
            }
            Some(Err(e)) => {
                println!("{}", e.to_string().red());
                continue;
            }
            None => {}
        }

        store.append(Role::User, line);

        let window = store.recent_window(config.chat.history_window);
        if window.is_empty() {
            tracing::debug!("Request window is empty, nothing to send");
            continue;
        }

        let outcome = match client.complete(&window).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Completion failed: {}", e);
                e.to_string()
            }
        };

        let turn = store.append(Role::Assistant, outcome);
        print_turn(turn);
    }

    Ok(())
}

/// Print one turn with its display timestamp
fn print_turn(turn: &Turn) {
    let stamp = turn.timestamp.format("%H:%M:%S").to_string().dimmed();
    let label = match turn.role {
        Role::User => "you".green(),
        Role::Assistant => "assistant".blue(),
        Role::System => "system".yellow(),
    };
    println!("{} {} {}", stamp, label.bold(), turn.content);
}

/// Print the full transcript
fn print_transcript(store: &ConversationStore) {
    if store.is_empty() {
        println!("{}", "No messages yet.".dimmed());
        return;
    }
    for turn in store.turns() {
        print_turn(turn);
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  /clear    discard the conversation and start fresh");
    println!("  /history  print the full transcript with timestamps");
    println!("  /help     show this help");
    println!("  /quit     exit the session");
}
