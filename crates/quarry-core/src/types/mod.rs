//! Shared value types used across all Quarry crates.

pub mod id;
pub mod outcome;
pub mod token;

pub use id::{CompanyId, UserId};
pub use outcome::ActionResult;
pub use token::AccessToken;
