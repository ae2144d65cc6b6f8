//! Read-only view of the session handed to consumers.

use serde::{Deserialize, Serialize};

use crate::company::Company;
use crate::permission::{Action, PermissionMap, Resource};
use crate::user::{User, UserRole};

use super::state::SessionState;

/// Everything a screen needs to decide what to fetch and render.
///
/// The bearer token is deliberately absent; only the session context holds
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Lifecycle state.
    pub state: SessionState,
    /// The authenticated user.
    pub user: Option<User>,
    /// The active company.
    pub active_company: Option<Company>,
    /// Companies the user may switch to.
    pub companies: Vec<Company>,
    /// Permissions in the active company.
    pub permissions: PermissionMap,
    /// Role in the active company.
    pub role: Option<UserRole>,
    /// True until startup validation resolves.
    pub loading: bool,
}

impl SessionSnapshot {
    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.state.is_authenticated()
    }

    /// Whether `action` on `resource` is granted in the active company.
    pub fn can(&self, resource: Resource, action: Action) -> bool {
        self.is_authenticated() && self.permissions.allows(resource, action)
    }

    /// Find an available company by id.
    pub fn company(&self, id: &quarry_core::CompanyId) -> Option<&Company> {
        self.companies.iter().find(|company| &company.id == id)
    }
}
