//! Response DTOs for the session endpoints.

use serde::{Deserialize, Serialize};

use quarry_core::AccessToken;
use quarry_entity::company::Company;
use quarry_entity::permission::PermissionMap;
use quarry_entity::user::{User, UserRole};

/// `POST /api/login` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent calls.
    pub access_token: AccessToken,
    /// Token type, `"bearer"` when present.
    #[serde(default)]
    pub token_type: Option<String>,
    /// The authenticated user. Some backends omit it; `/me` then supplies it.
    #[serde(default)]
    pub user: Option<User>,
    /// The company the token is scoped to.
    #[serde(default)]
    pub company: Option<Company>,
}

/// `GET /api/me` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// The authenticated user.
    pub user: User,
    /// The company the token is scoped to.
    #[serde(default)]
    pub company: Option<Company>,
    /// Role in that company. Unknown roles read as `None`.
    #[serde(default, deserialize_with = "quarry_entity::user::role::lenient")]
    pub role: Option<UserRole>,
    /// Permissions in that company.
    #[serde(default)]
    pub permissions: PermissionMap,
}

/// `POST /api/switch-company` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchCompanyResponse {
    /// New bearer token scoped to `company`.
    pub access_token: AccessToken,
    /// The newly active company.
    pub company: Company,
}

/// Error body returned by the backend on non-2xx responses.
///
/// `detail` is a string for most errors and a list of field errors for
/// request validation failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error detail.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Flatten `detail` into one operator-facing string.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            serde_json::Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|item| {
                        item.get("msg")
                            .and_then(|m| m.as_str())
                            .map(str::to_string)
                            .or_else(|| item.as_str().map(str::to_string))
                    })
                    .collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        }
    }
}
