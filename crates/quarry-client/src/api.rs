//! The backend seam used by the session context.

use async_trait::async_trait;

use quarry_core::{AccessToken, AppResult};
use quarry_entity::company::Company;
use quarry_entity::permission::Resource;

use crate::dto::{
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, SwitchCompanyRequest,
    SwitchCompanyResponse,
};

/// Logical operations of the ERP backend.
///
/// Authenticated calls take the bearer token explicitly, so the caller
/// decides which token a request carries and a replaced token can never be
/// attached by accident.
#[async_trait]
pub trait ApiClient: Send + Sync + 'static {
    /// Exchange credentials for a bearer token.
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse>;

    /// Create a user account without authenticating it.
    async fn register(&self, request: &RegisterRequest) -> AppResult<()>;

    /// Identity, role and permissions for the token's company.
    async fn me(&self, token: &AccessToken) -> AppResult<MeResponse>;

    /// Companies the token's user may operate in.
    async fn companies(&self, token: &AccessToken) -> AppResult<Vec<Company>>;

    /// Request a token scoped to another company.
    async fn switch_company(
        &self,
        token: &AccessToken,
        request: &SwitchCompanyRequest,
    ) -> AppResult<SwitchCompanyResponse>;

    /// List records of a resource in the token's company.
    async fn fetch_collection(
        &self,
        token: &AccessToken,
        resource: Resource,
    ) -> AppResult<Vec<serde_json::Value>>;
}
