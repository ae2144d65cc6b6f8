//! Console command definitions and dispatch.

pub mod companies;
pub mod config;
pub mod fetch;
pub mod login;
pub mod menu;
pub mod register;
pub mod status;
pub mod switch;

use clap::{Parser, Subcommand};

use quarry_auth::SessionContext;
use quarry_core::config::AppConfig;
use quarry_core::{ActionResult, AppError};

use crate::output::OutputFormat;

/// Quarry: multi-company quarry operations console
#[derive(Debug, Parser)]
#[command(name = "quarry", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "QUARRY_CONFIG", default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and persist the session token
    Login(login::LoginArgs),
    /// Clear the persisted session
    Logout,
    /// Create a user account
    Register(register::RegisterArgs),
    /// Show the current session
    Status,
    /// List companies available to the logged-in user
    Companies,
    /// Make another company active
    Switch(switch::SwitchArgs),
    /// Show navigation entries and dashboard widgets permitted in the active company
    Menu(menu::MenuArgs),
    /// List records of a resource in the active company
    Fetch(fetch::FetchArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Whether the command needs a bootstrapped session.
    pub fn needs_session(&self) -> bool {
        !matches!(self.command, Commands::Config(_))
    }

    /// Execute the command against a bootstrapped session
    pub async fn execute(&self, config: &AppConfig, session: &SessionContext) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => login::execute(args, session).await,
            Commands::Logout => {
                session.logout();
                crate::output::print_success("Logged out");
                Ok(())
            }
            Commands::Register(args) => register::execute(args, session).await,
            Commands::Status => status::execute(session, self.format),
            Commands::Companies => companies::execute(session, self.format),
            Commands::Switch(args) => switch::execute(args, session).await,
            Commands::Menu(args) => menu::execute(args, session, self.format),
            Commands::Fetch(args) => fetch::execute(args, session, self.format).await,
            Commands::Config(args) => config::execute(args, config, &self.config, self.format),
        }
    }
}

/// Helper: turn a failed action into an error carrying its message
pub(crate) fn into_result(result: ActionResult) -> Result<(), AppError> {
    match result {
        ActionResult::Success => Ok(()),
        ActionResult::Failure { error } => Err(AppError::session(error)),
    }
}

/// Helper: fail unless a user is logged in
pub(crate) fn require_login(session: &SessionContext) -> Result<(), AppError> {
    if session.snapshot().is_authenticated() {
        Ok(())
    } else {
        Err(AppError::session("Not logged in. Run `quarry login` first"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_global_flags_and_subcommand() {
        let cli = Cli::try_parse_from(["quarry", "--format", "json", "switch", "c2"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Switch(ref args) if args.company_id.as_str() == "c2"));
        assert!(cli.needs_session());
    }

    #[test]
    fn test_config_command_skips_session() {
        let cli = Cli::try_parse_from(["quarry", "config", "show"]).unwrap();
        assert!(!cli.needs_session());
    }

    #[test]
    fn test_fetch_rejects_unknown_resource() {
        assert!(Cli::try_parse_from(["quarry", "fetch", "spaceships"]).is_err());
        let cli = Cli::try_parse_from(["quarry", "fetch", "costing-centers"]).unwrap();
        assert!(matches!(cli.command, Commands::Fetch(_)));
    }

    #[test]
    fn test_failed_action_becomes_error_with_message() {
        let err = into_result(ActionResult::failure("Invalid credentials")).unwrap_err();
        assert_eq!(err.message, "Invalid credentials");
        assert!(into_result(ActionResult::Success).is_ok());
    }
}
