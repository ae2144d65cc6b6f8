//! `quarry status`.

use quarry_auth::SessionContext;
use quarry_core::AppError;
use quarry_entity::session::SessionState;

use crate::output::{self, OutputFormat};

/// Execute the status command
pub fn execute(session: &SessionContext, format: OutputFormat) -> Result<(), AppError> {
    let snapshot = session.snapshot();
    if format == OutputFormat::Json {
        output::print_item(&snapshot, format);
        return Ok(());
    }

    let state = match &snapshot.state {
        SessionState::Uninitialized => "uninitialized",
        SessionState::Loading => "loading",
        SessionState::Anonymous => "logged out",
        SessionState::Authenticated { .. } => "logged in",
    };
    output::print_kv("Session", state);

    let Some(user) = &snapshot.user else {
        return Ok(());
    };
    output::print_kv("User", &format!("{} ({})", user.display_name(), user.username));
    if let Some(role) = snapshot.role.or(user.role) {
        output::print_kv("Role", &format!("{} / {}", role.as_str(), role.display_name()));
    }
    match &snapshot.active_company {
        Some(company) => output::print_kv("Company", &format!("{} [{}]", company.name, company.id)),
        None => output::print_kv("Company", "none"),
    }
    output::print_kv("Available companies", &snapshot.companies.len().to_string());

    let granted: Vec<String> = snapshot
        .permissions
        .iter()
        .map(|(resource, actions)| {
            let actions: Vec<&str> = actions.iter().map(|a| a.as_str()).collect();
            format!("{resource}({})", actions.join(","))
        })
        .collect();
    if granted.is_empty() {
        output::print_kv("Permissions", "none");
    } else {
        output::print_kv("Permissions", &granted.join(" "));
    }
    Ok(())
}
