//! `quarry companies`.

use serde::Serialize;
use tabled::Tabled;

use quarry_auth::SessionContext;
use quarry_core::AppError;

use crate::output::{self, OutputFormat};

/// Company display row for table output
#[derive(Debug, Serialize, Tabled)]
struct CompanyRow {
    /// Marks the active company
    #[tabled(rename = "")]
    active: &'static str,
    /// Company ID
    id: String,
    /// Name
    name: String,
    /// English name
    name_en: String,
    /// City
    city: String,
    /// Status
    status: String,
}

/// Execute the companies command
pub fn execute(session: &SessionContext, format: OutputFormat) -> Result<(), AppError> {
    super::require_login(session)?;
    let snapshot = session.snapshot();
    let active = snapshot.active_company.as_ref().map(|c| &c.id);

    let rows: Vec<CompanyRow> = snapshot
        .companies
        .iter()
        .map(|company| CompanyRow {
            active: if Some(&company.id) == active { "*" } else { "" },
            id: company.id.to_string(),
            name: company.name.clone(),
            name_en: company.name_en.clone().unwrap_or_default(),
            city: company.city.clone().unwrap_or_default(),
            status: company
                .status
                .map(|status| format!("{status:?}").to_uppercase())
                .unwrap_or_default(),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
