//! # quarry-client
//!
//! Typed access to the ERP backend's REST API.
//!
//! ## Modules
//!
//! - `api` - the [`ApiClient`] trait the session context depends on
//! - `dto` - request and response payloads
//! - `http` - the reqwest-backed implementation and HTTP error mapping

pub mod api;
pub mod dto;
pub mod http;

pub use api::ApiClient;
pub use http::HttpApiClient;
