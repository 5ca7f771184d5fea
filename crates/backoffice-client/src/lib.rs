//! HTTP client SDK for the backoffice admin API.
//!
//! The client injects a bearer token from a pluggable [`TokenSource`] and
//! keeps GET responses in a short-lived in-memory cache.
//!
//! # Example
//!
//! ```no_run
//! use backoffice_client::{ApiClient, LoginRequest, Result, UserQuery};
//!
//! # async fn example() -> Result<()> {
//! let client = ApiClient::builder()
//!     .base_url("http://localhost:5175")
//!     .build()?;
//!
//! let auth = client
//!     .auth()
//!     .login(LoginRequest {
//!         username_or_email: "admin".into(),
//!         password: "secret".into(),
//!     })
//!     .await?;
//!
//! if let Some(token) = auth.token {
//!     client.set_token_source(std::sync::Arc::new(backoffice_client::StaticToken(token)));
//! }
//!
//! // Served from the cache for the next 60 seconds.
//! let page = client.users().list(UserQuery::default()).await?;
//! println!("{} users", page.total);
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Users**: list (paged), get, create, update, delete
//! - **Roles**: list, get, create
//! - **Auth**: login, register

pub mod api;
pub mod cache;
pub mod client;
pub mod error;
pub mod request;
pub mod token;
pub mod types;

pub use api::{AuthApi, RolesApi, UserQuery, UsersApi, validate_id};
pub use client::{ApiClient, ClientBuilder, DEFAULT_CACHE_TTL};
pub use error::{Error, Result};
pub use request::{Method, RequestOptions};
pub use token::{NoToken, StaticToken, TokenSource};
pub use types::*;
