//! Session store for the backoffice client.
//!
//! This crate provides:
//! - [`SessionStore`]: the current token and role, persisted through a
//!   [`KeyValueStorage`] backend and exposed to the HTTP client as a
//!   [`TokenSource`](backoffice_client::TokenSource)
//! - [`FileStorage`] and [`MemoryStorage`] backends
//! - [`Navigator`]: the hook used for hard redirects on forced logout
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use backoffice_session::{FileStorage, SessionStore};
//!
//! let storage = Arc::new(FileStorage::new("/tmp/backoffice/session.json"));
//! let session = Arc::new(SessionStore::new(storage)?);
//! client.set_token_source(session.clone());
//! ```

mod error;
mod navigator;
mod storage;
mod store;

pub use error::{Error, Result};
pub use navigator::{LogNavigator, Navigator};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{LOGIN_PATH, ROLE_KEY, Session, SessionStore, TOKEN_KEY, USER_KEY};
