//! `quarry switch`.

use clap::Args;

use quarry_auth::SessionContext;
use quarry_core::{AppError, CompanyId};

use crate::output;

/// Arguments for the switch command
#[derive(Debug, Args)]
pub struct SwitchArgs {
    /// Company to make active
    pub company_id: CompanyId,
}

/// Execute the switch command
pub async fn execute(args: &SwitchArgs, session: &SessionContext) -> Result<(), AppError> {
    super::require_login(session)?;
    super::into_result(session.switch_company(&args.company_id).await)?;

    let snapshot = session.snapshot();
    let name = snapshot
        .active_company
        .as_ref()
        .map(|company| company.name.as_str())
        .unwrap_or(args.company_id.as_str());
    output::print_success(&format!("Active company: {name}"));
    Ok(())
}
