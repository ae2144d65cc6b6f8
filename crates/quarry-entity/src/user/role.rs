//! User role enumeration.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role held by a user inside one company.
///
/// The backend derives the permission map from the role; the client only
/// uses the role for display and for the elevated-scope flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Platform-level administrator.
    #[serde(alias = "system-admin", alias = "system_admin")]
    Superadmin,
    /// Company owner with full access.
    Owner,
    /// Operations manager.
    Manager,
    /// Financial operations.
    Accountant,
    /// Production supervisor.
    Foreman,
    /// Field worker.
    Driver,
    /// Security personnel.
    Guard,
}

impl UserRole {
    /// All roles, most privileged first.
    pub const ALL: [UserRole; 7] = [
        Self::Superadmin,
        Self::Owner,
        Self::Manager,
        Self::Accountant,
        Self::Foreman,
        Self::Driver,
        Self::Guard,
    ];

    /// Return the role as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Owner => "owner",
            Self::Manager => "manager",
            Self::Accountant => "accountant",
            Self::Foreman => "foreman",
            Self::Driver => "driver",
            Self::Guard => "guard",
        }
    }

    /// Arabic display name used in the console header.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Superadmin => "مدير النظام",
            Self::Owner => "المالك",
            Self::Manager => "مدير",
            Self::Accountant => "محاسب",
            Self::Foreman => "مشرف",
            Self::Driver => "سائق",
            Self::Guard => "حارس",
        }
    }

    /// Platform-wide scope.
    pub fn is_system_admin(&self) -> bool {
        matches!(self, Self::Superadmin)
    }

    /// Full scope inside a company.
    pub fn is_company_admin(&self) -> bool {
        matches!(self, Self::Superadmin | Self::Owner)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = quarry_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if matches!(lowered.as_str(), "system-admin" | "system_admin") {
            return Ok(Self::Superadmin);
        }
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == lowered)
            .ok_or_else(|| {
                quarry_core::AppError::validation(format!(
                    "Invalid user role: '{s}'. Expected one of: superadmin, owner, manager, \
                     accountant, foreman, driver, guard"
                ))
            })
    }
}

/// Deserialize an optional role, mapping unknown values to `None`.
///
/// Use with `#[serde(default, deserialize_with = "...")]` on role fields of
/// backend payloads.
pub fn lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<UserRole>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value.parse::<UserRole>() {
        Ok(role) => Some(role),
        Err(_) => {
            tracing::warn!(role = %value, "Ignoring unknown user role");
            None
        }
    }))
}
