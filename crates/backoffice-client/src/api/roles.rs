//! Roles API.

use std::time::Duration;

use super::resource_path;
use crate::client::ApiClient;
use crate::error::Result;
use crate::request::{Method, RequestOptions};
use crate::types::{NewRole, Role};

/// Roles change rarely; reads stay fresh for five minutes.
pub const ROLES_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Roles API client.
pub struct RolesApi {
    client: ApiClient,
}

impl RolesApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List all roles.
    pub async fn list(&self) -> Result<Vec<Role>> {
        self.client
            .request("/roles", RequestOptions::get_cached(ROLES_CACHE_TTL))
            .await
    }

    /// Get a role by ID.
    pub async fn get(&self, id: &str) -> Result<Role> {
        self.client
            .request(
                &resource_path("roles", id)?,
                RequestOptions::get_cached(ROLES_CACHE_TTL),
            )
            .await
    }

    /// Create a new role.
    pub async fn create(&self, role: NewRole) -> Result<Role> {
        let options = RequestOptions::method(Method::Post).with_body(&role)?;
        self.client.request("/roles", options).await
    }
}
