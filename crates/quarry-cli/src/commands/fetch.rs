//! `quarry fetch`.

use clap::Args;

use quarry_auth::SessionContext;
use quarry_core::AppError;
use quarry_entity::permission::Resource;

use crate::output::{self, OutputFormat};

/// Arguments for the fetch command
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Resource to list, e.g. `equipment` or `costing-centers`
    pub resource: Resource,
}

/// Execute the fetch command
pub async fn execute(
    args: &FetchArgs,
    session: &SessionContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    super::require_login(session)?;
    let records = session.fetch_collection(args.resource).await?;
    tracing::debug!(resource = %args.resource, count = records.len(), "Fetched collection");
    output::print_records(&records, format);
    Ok(())
}
