//! Configuration management commands.

use clap::{Args, Subcommand};

use quarry_core::AppError;
use quarry_core::config::AppConfig;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Check the configuration for obvious mistakes
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_item(config, format),
        ConfigCommand::Validate => {
            validate(config)?;
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            output::print_kv("Backend", &config.api.base_url);
            output::print_kv("Token file", &config.session.token_file);
            output::print_kv("Log level", &config.logging.level);
        }
    }
    Ok(())
}

fn validate(config: &AppConfig) -> Result<(), AppError> {
    let base_url = config.api.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(AppError::configuration(format!(
            "api.base_url must be an http(s) URL, got '{base_url}'"
        )));
    }
    if config.api.timeout_seconds == 0 {
        return Err(AppError::configuration("api.timeout_seconds must be positive"));
    }
    if config.session.token_key.trim().is_empty() {
        return Err(AppError::configuration("session.token_key must not be empty"));
    }
    if !matches!(config.logging.format.as_str(), "json" | "pretty") {
        return Err(AppError::configuration(format!(
            "logging.format must be 'json' or 'pretty', got '{}'",
            config.logging.format
        )));
    }
    Ok(())
}
