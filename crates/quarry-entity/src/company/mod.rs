//! Company (tenant) entities.

pub mod model;

pub use model::{Company, CompanyStatus};
