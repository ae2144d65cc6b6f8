//! `quarry register`.

use clap::Args;
use dialoguer::Password;

use quarry_auth::SessionContext;
use quarry_client::dto::RegisterRequest;
use quarry_core::{AppError, CompanyId};
use quarry_entity::user::UserRole;

use crate::output;

/// Arguments for the register command
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Login name
    #[arg(long)]
    pub username: String,
    /// Email address
    #[arg(long)]
    pub email: String,
    /// Display name
    #[arg(long)]
    pub full_name: String,
    /// Password; prompted with confirmation when omitted
    #[arg(long)]
    pub password: Option<String>,
    /// Company to join
    #[arg(long)]
    pub company_id: Option<CompanyId>,
    /// Role in that company
    #[arg(long)]
    pub role: Option<UserRole>,
    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Department
    #[arg(long)]
    pub department: Option<String>,
    /// Employee number
    #[arg(long)]
    pub employee_id: Option<String>,
}

/// Execute the register command
pub async fn execute(args: &RegisterArgs, session: &SessionContext) -> Result<(), AppError> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Failed to read password: {e}")))?,
    };

    let request = RegisterRequest {
        username: args.username.trim().to_string(),
        email: args.email.trim().to_string(),
        full_name: args.full_name.trim().to_string(),
        password,
        company_id: args.company_id.clone(),
        role: args.role,
        phone: args.phone.clone(),
        department: args.department.clone(),
        employee_id: args.employee_id.clone(),
    };

    super::into_result(session.register(request).await)?;
    output::print_success(&format!("User '{}' registered. Log in to continue", args.username));
    Ok(())
}
