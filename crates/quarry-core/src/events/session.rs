//! Session lifecycle events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{CompanyId, UserId};

/// Why a session was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutReason {
    /// The operator asked to log out.
    UserRequested,
    /// The backend rejected the bearer token on a data request.
    TokenExpired,
}

impl fmt::Display for LogoutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserRequested => write!(f, "user_requested"),
            Self::TokenExpired => write!(f, "token_expired"),
        }
    }
}

/// Events related to the client session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// Startup token validation finished.
    Bootstrapped {
        /// Whether a persisted token was accepted.
        authenticated: bool,
    },
    /// Credentials were exchanged for a token.
    LoggedIn {
        /// The authenticated user.
        user_id: UserId,
        /// The company the token is scoped to.
        company_id: Option<CompanyId>,
    },
    /// The session was cleared.
    LoggedOut {
        /// Why it was cleared.
        reason: LogoutReason,
    },
    /// The active company changed and the token was replaced.
    CompanySwitched {
        /// Previously active company.
        from: Option<CompanyId>,
        /// Newly active company.
        to: CompanyId,
    },
    /// A fresh permission map was applied for a company.
    PermissionsRefreshed {
        /// The company the permissions belong to.
        company_id: Option<CompanyId>,
    },
}
