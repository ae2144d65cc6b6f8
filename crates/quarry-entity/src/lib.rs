//! # quarry-entity
//!
//! Domain models for the Quarry console session. Every struct here is a
//! backend payload or a client-side value object. All entities derive
//! `Debug`, `Clone`, `Serialize` and `Deserialize`.

pub mod company;
pub mod permission;
pub mod session;
pub mod user;
