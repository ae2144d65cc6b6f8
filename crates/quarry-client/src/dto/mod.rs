//! Request and response payloads for the session endpoints.

pub mod request;
pub mod response;

pub use request::{LoginRequest, RegisterRequest, SwitchCompanyRequest};
pub use response::{ErrorBody, LoginResponse, MeResponse, SwitchCompanyResponse};
