//! Session lifecycle: bootstrap, login, register, company switch, logout.

pub mod context;
pub mod submission;

pub use context::SessionContext;
pub use submission::{Submission, SubmissionGuard};
