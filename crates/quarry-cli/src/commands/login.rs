//! `quarry login`.

use clap::Args;
use dialoguer::{Input, Password};

use quarry_auth::SessionContext;
use quarry_core::AppError;

use crate::output;

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username; prompted when omitted
    #[arg(short, long)]
    pub username: Option<String>,
    /// Password; prompted without echo when omitted
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Execute the login command
pub async fn execute(args: &LoginArgs, session: &SessionContext) -> Result<(), AppError> {
    let username = match &args.username {
        Some(username) => username.clone(),
        None => Input::<String>::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Failed to read username: {e}")))?,
    };
    let password = match &args.password {
        Some(password) => password.clone(),
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Failed to read password: {e}")))?,
    };

    super::into_result(session.login(&username, &password).await)?;

    let snapshot = session.snapshot();
    let name = snapshot
        .user
        .as_ref()
        .map(|user| user.display_name().to_string())
        .unwrap_or(username);
    match &snapshot.active_company {
        Some(company) => output::print_success(&format!("Logged in as {name} ({})", company.name)),
        None => output::print_success(&format!("Logged in as {name}")),
    }
    if snapshot.permissions.is_empty() {
        output::print_warning("No permissions loaded for the active company; the menu is empty");
    }
    Ok(())
}
