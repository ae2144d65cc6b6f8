//! `quarry menu`.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use quarry_auth::SessionContext;
use quarry_core::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the menu command
#[derive(Debug, Args)]
pub struct MenuArgs {
    /// List dashboard widgets instead of sidebar entries
    #[arg(long)]
    pub widgets: bool,
}

/// Sidebar row for table output
#[derive(Debug, Serialize, Tabled)]
struct MenuRow {
    /// Route path
    path: &'static str,
    /// Label
    label: &'static str,
    /// Gating resource
    resource: String,
}

/// Dashboard widget row for table output
#[derive(Debug, Serialize, Tabled)]
struct WidgetRow {
    /// Widget ID
    id: &'static str,
    /// Title
    title: &'static str,
    /// Gating resource
    resource: String,
}

/// Execute the menu command
pub fn execute(args: &MenuArgs, session: &SessionContext, format: OutputFormat) -> Result<(), AppError> {
    super::require_login(session)?;

    if args.widgets {
        let rows: Vec<WidgetRow> = session
            .dashboard_widgets()
            .into_iter()
            .map(|widget| WidgetRow {
                id: widget.id,
                title: widget.title,
                resource: widget.resource.to_string(),
            })
            .collect();
        output::print_list(&rows, format);
    } else {
        let rows: Vec<MenuRow> = session
            .navigation()
            .into_iter()
            .map(|item| MenuRow {
                path: item.path,
                label: item.label,
                resource: item.resource.to_string(),
            })
            .collect();
        output::print_list(&rows, format);
    }
    Ok(())
}
