//! Actions a permission map can grant on a resource.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use quarry_core::AppError;

/// An action on a [`Resource`](super::Resource).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Create records.
    Create,
    /// List and view records.
    Read,
    /// Modify records.
    Update,
    /// Remove records.
    Delete,
    /// Export reports.
    Export,
    /// Generic write access granted by some backends.
    Write,
}

impl Action {
    /// Every known action.
    pub const ALL: [Action; 6] = [
        Self::Create,
        Self::Read,
        Self::Update,
        Self::Delete,
        Self::Export,
        Self::Write,
    ];

    /// Return the action as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Export => "export",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == lowered)
            .ok_or_else(|| AppError::validation(format!("Unknown action: '{s}'")))
    }
}
