//! HTTP client for the ERP backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use quarry_core::config::ApiConfig;
use quarry_core::{AccessToken, AppError, AppResult};
use quarry_entity::company::Company;
use quarry_entity::permission::Resource;

use crate::api::ApiClient;
use crate::dto::{
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, SwitchCompanyRequest,
    SwitchCompanyResponse,
};

use super::error::{status_error, transport_error};

/// REST client rooted at `{base_url}/api`.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    /// Underlying reqwest client (connection pool).
    client: Client,
    /// `{base_url}/api`, without trailing slash.
    api_root: String,
}

impl HttpApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_root: format!("{}/api", config.base_url.trim_end_matches('/')),
        })
    }

    /// The API root this client targets.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn request(&self, method: Method, path: &str, token: Option<&AccessToken>) -> RequestBuilder {
        let url = format!("{}/{}", self.api_root, path.trim_start_matches('/'));
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> AppResult<Vec<u8>> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        debug!(status = status.as_u16(), bytes = body.len(), "Backend response");

        if status.is_success() {
            Ok(body.to_vec())
        } else {
            Err(status_error(status, &body))
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let body = self.send(builder).await?;
        serde_json::from_slice(&body).map_err(|e| {
            AppError::with_source(
                quarry_core::ErrorKind::Serialization,
                format!("Unexpected backend payload: {e}"),
                e,
            )
        })
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&AccessToken>,
        body: &B,
    ) -> AppResult<T> {
        self.send_json(self.request(Method::POST, path, token).json(body))
            .await
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        self.post_json("login", None, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> AppResult<()> {
        self.send(self.request(Method::POST, "register", None).json(request))
            .await
            .map(|_| ())
    }

    async fn me(&self, token: &AccessToken) -> AppResult<MeResponse> {
        self.send_json(self.request(Method::GET, "me", Some(token)))
            .await
    }

    async fn companies(&self, token: &AccessToken) -> AppResult<Vec<Company>> {
        self.send_json(self.request(Method::GET, "companies", Some(token)))
            .await
    }

    async fn switch_company(
        &self,
        token: &AccessToken,
        request: &SwitchCompanyRequest,
    ) -> AppResult<SwitchCompanyResponse> {
        self.post_json("switch-company", Some(token), request).await
    }

    async fn fetch_collection(
        &self,
        token: &AccessToken,
        resource: Resource,
    ) -> AppResult<Vec<serde_json::Value>> {
        let path = resource.collection_path();
        self.send_json(self.request(Method::GET, &path, Some(token)))
            .await
    }
}
