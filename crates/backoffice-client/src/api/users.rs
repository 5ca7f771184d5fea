//! Users API.

use std::time::Duration;

use super::resource_path;
use crate::client::ApiClient;
use crate::error::Result;
use crate::request::{Method, RequestOptions};
use crate::types::{NewUser, Page, User, UserUpdate};

/// Freshness window for user reads.
pub const USERS_CACHE_TTL: Duration = Duration::from_secs(60);

/// Query parameters for listing users.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct UserQuery {
    /// Page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl UserQuery {
    /// Render as `?page=..&size=..`, or an empty string when nothing is set.
    pub fn to_query_string(&self) -> Result<String> {
        let encoded = serde_urlencoded::to_string(self)
            .map_err(|e| crate::error::Error::Config(format!("invalid query: {}", e)))?;
        if encoded.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("?{}", encoded))
        }
    }
}

/// Users API client.
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List users, one page at a time.
    pub async fn list(&self, query: UserQuery) -> Result<Page<User>> {
        let path = format!("/users{}", query.to_query_string()?);
        self.client
            .request(&path, RequestOptions::get_cached(USERS_CACHE_TTL))
            .await
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> Result<User> {
        self.client
            .request(
                &resource_path("users", id)?,
                RequestOptions::get_cached(USERS_CACHE_TTL),
            )
            .await
    }

    /// Create a new user.
    pub async fn create(&self, user: NewUser) -> Result<User> {
        let options = RequestOptions::method(Method::Post).with_body(&user)?;
        self.client.request("/users", options).await
    }

    /// Update a user.
    pub async fn update(&self, id: &str, update: UserUpdate) -> Result<User> {
        let options = RequestOptions::method(Method::Put).with_body(&update)?;
        self.client.request(&resource_path("users", id)?, options).await
    }

    /// Delete a user.
    ///
    /// Whatever the server sends back (often nothing) is discarded.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _: serde_json::Value = self
            .client
            .request(&resource_path("users", id)?, RequestOptions::method(Method::Delete))
            .await?;
        Ok(())
    }
}
