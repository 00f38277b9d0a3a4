//! Command handlers for Heliochat
//!
//! Each CLI subcommand has a handler module here; the handlers own the
//! session wiring and leave argument parsing to [`crate::cli`].

pub mod chat;
pub mod check;
