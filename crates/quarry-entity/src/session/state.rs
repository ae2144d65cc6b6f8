//! Session lifecycle state.

use serde::{Deserialize, Serialize};

use quarry_core::CompanyId;

/// Lifecycle of a client session.
///
/// `Uninitialized -> Loading -> {Authenticated, Anonymous}`; `login` moves
/// `Anonymous -> Authenticated`, `logout` or an expired token moves back,
/// and a company switch moves between `Authenticated` sub-states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Nothing has run yet.
    #[default]
    Uninitialized,
    /// A persisted token is being validated.
    Loading,
    /// No user is logged in.
    Anonymous,
    /// A user is logged in, scoped to the given company.
    Authenticated {
        /// The active company, when the backend assigned one.
        company: Option<CompanyId>,
    },
}

impl SessionState {
    /// Whether protected content may be rendered.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Whether token validation has not finished yet.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Loading)
    }
}
