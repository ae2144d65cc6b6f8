//! Resources that the backend grants permissions on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use quarry_core::AppError;

macro_rules! define_resources {
    ($( $(#[$meta:meta])* $variant:ident => $wire:literal ),+ $(,)?) => {
        /// A permission-gated resource. The wire form is the snake_case key
        /// used in the backend's permission map.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Resource {
            $( $(#[$meta])* $variant, )+
        }

        impl Resource {
            /// Every known resource.
            pub const ALL: &'static [Resource] = &[ $( Self::$variant, )+ ];

            /// Return the resource key as used by the backend.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }
    };
}

define_resources! {
    /// Tenant administration.
    Companies => "companies",
    /// User administration.
    Users => "users",
    /// Heavy equipment fleet.
    Equipment => "equipment",
    /// Production records.
    Production => "production",
    /// Expense entries.
    Expenses => "expenses",
    /// Customer invoices.
    Invoices => "invoices",
    /// Worker attendance.
    Attendance => "attendance",
    /// Costing centers.
    CostingCenters => "costing_centers",
    /// Main dashboard.
    Dashboard => "dashboard",
    /// Reports and exports.
    Reports => "reports",
    /// Organizational chart.
    OrgChart => "org_chart",
    /// Projects.
    Projects => "projects",
    /// Feasibility studies.
    FeasibilityStudies => "feasibility_studies",
    /// Investments.
    Investments => "investments",
    /// Financial projections.
    FinancialProjections => "financial_projections",
    /// Accounting (chart of accounts).
    ChartOfAccounts => "chart_of_accounts",
}

impl Resource {
    /// REST collection path segment under `/api/`.
    pub fn collection_path(&self) -> String {
        self.as_str().replace('_', "-")
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|resource| resource.as_str() == key)
            .ok_or_else(|| AppError::validation(format!("Unknown resource: '{s}'")))
    }
}
