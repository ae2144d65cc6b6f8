//! # quarry-auth
//!
//! Client-side session and authorization for the Quarry console.
//!
//! ## Modules
//!
//! - `token` - bearer token persistence (file and in-memory stores)
//! - `access` - permission gate, navigation catalog, and route guard
//! - `session` - the single-writer [`SessionContext`] and its operations

pub mod access;
pub mod session;
pub mod token;

pub use access::{NavItem, PermissionGate, Requirement, RouteDecision, RouteGuard};
pub use session::{SessionContext, SubmissionGuard};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
