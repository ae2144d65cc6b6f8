//! Convenience result type alias for the Quarry console.

use crate::error::AppError;

/// A specialized `Result` type for Quarry operations.
pub type AppResult<T> = Result<T, AppError>;
