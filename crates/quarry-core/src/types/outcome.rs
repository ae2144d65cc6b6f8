//! Discriminated result for user-initiated session actions.
//!
//! `login`, `register` and `switch_company` never propagate errors to the
//! caller; they resolve to an [`ActionResult`]. On the wire it serializes to
//! `{"success": true}` or `{"success": false, "error": "..."}`.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::AppError;

/// Outcome of a user-initiated action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// The action completed.
    Success,
    /// The action failed with an operator-facing message.
    Failure {
        /// Message to display near the form.
        error: String,
    },
}

impl ActionResult {
    /// Build a failure result.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    /// Whether the action succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { error } => Some(error),
        }
    }
}

impl ActionResult {
    /// Convert an error into a failure, preferring the backend's detail
    /// string and falling back to `fallback` for transport or local errors.
    pub fn from_error(err: &AppError, fallback: &str) -> Self {
        Self::failure(err.detail.as_deref().unwrap_or(fallback))
    }
}

impl Serialize for ActionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success => {
                let mut state = serializer.serialize_struct("ActionResult", 1)?;
                state.serialize_field("success", &true)?;
                state.end()
            }
            Self::Failure { error } => {
                let mut state = serializer.serialize_struct("ActionResult", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.end()
            }
        }
    }
}
