//! Quarry console: session client for the multi-company quarry ERP.
//!
//! Main entry point that wires configuration, logging, the HTTP backend
//! client and the session context together, then runs one console command.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use quarry_auth::{FileTokenStore, SessionContext};
use quarry_cli::Cli;
use quarry_cli::output;
use quarry_client::HttpApiClient;
use quarry_core::AppError;
use quarry_core::config::AppConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(&cli, config).await {
        tracing::debug!(kind = %e.kind, remote = e.kind.is_remote(), message = %e.message, "Command failed");
        output::print_error(e.display_message());
        std::process::exit(1);
    }
}

/// Load configuration from file, env overlay and environment
fn load_configuration(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("QUARRY_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    // Logs go to stderr so command output on stdout stays machine-readable.
    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Build the session context and execute the command
async fn run(cli: &Cli, config: AppConfig) -> Result<(), AppError> {
    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.api.base_url,
        "Starting Quarry console"
    );

    let api = Arc::new(HttpApiClient::new(&config.api)?);
    let tokens = Arc::new(FileTokenStore::from_config(&config.session));
    let session = SessionContext::new(api, tokens, &config.session);

    if cli.needs_session() {
        session.bootstrap().await;
    }

    cli.execute(&config, &session).await
}
