//! Auth API.

use crate::client::ApiClient;
use crate::error::Result;
use crate::request::{Method, RequestOptions};
use crate::types::{AuthResponse, LoginRequest, RegisterRequest};

/// Auth API client.
///
/// Never cached: both endpoints are POSTs.
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token.
    pub async fn login(&self, credentials: LoginRequest) -> Result<AuthResponse> {
        let options = RequestOptions::method(Method::Post).with_body(&credentials)?;
        self.client.request("/auth/login", options).await
    }

    /// Register a new account.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        let options = RequestOptions::method(Method::Post).with_body(&request)?;
        self.client.request("/auth/register", options).await
    }
}
