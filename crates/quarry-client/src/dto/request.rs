//! Request DTOs with field validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use quarry_core::{AppError, CompanyId};
use quarry_entity::user::UserRole;

/// `POST /api/login`
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Plain-text password, sent over TLS only.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// `POST /api/register`
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired login name.
    #[validate(length(min = 1, max = 150, message = "Username is required"))]
    pub username: String,
    /// Contact email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    /// Initial password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Company to join.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    /// Requested role; the backend defaults to `driver`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Department name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Employee number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("company_id", &self.company_id)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// `POST /api/switch-company`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchCompanyRequest {
    /// Company to scope the new token to.
    pub company_id: CompanyId,
}

/// Run field validation and collapse the failures into one message.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), AppError> {
    request.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {field}"))
                })
            })
            .collect();
        messages.sort();
        AppError::validation(messages.join("; "))
    })
}
