//! # quarry-core
//!
//! Core crate for the Quarry operations console. Contains configuration
//! schemas, typed identifiers, the discriminated action result, session
//! domain events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Quarry crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
pub use types::{AccessToken, ActionResult, CompanyId, UserId};
