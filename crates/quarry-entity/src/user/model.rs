//! User entity model.

use serde::{Deserialize, Serialize};

use quarry_core::{CompanyId, UserId};

use super::role::UserRole;

/// The authenticated actor as reported by the backend.
///
/// Unknown fields are ignored so backend additions do not break login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Human-readable display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Role in the user's main company. Unknown roles read as `None`.
    #[serde(default, deserialize_with = "super::role::lenient")]
    pub role: Option<UserRole>,
    /// Main company association.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    /// Companies the user may operate in.
    #[serde(default)]
    pub companies: Vec<CompanyId>,
    /// Whether the account is enabled.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl User {
    /// Name to show in headers: the full name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// Platform-wide administrator.
    pub fn is_system_admin(&self) -> bool {
        self.role.is_some_and(|role| role.is_system_admin())
    }

    /// Administrator of the active company.
    pub fn is_company_admin(&self) -> bool {
        self.role.is_some_and(|role| role.is_company_admin())
    }
}

fn default_active() -> bool {
    true
}
