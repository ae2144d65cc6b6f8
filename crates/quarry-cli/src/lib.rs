//! Quarry console commands.
//!
//! The binary wires a [`SessionContext`](quarry_auth::SessionContext) and
//! hands it to [`Cli::execute`].

pub mod commands;
pub mod output;

pub use commands::Cli;
