//! Configuration for the backoffice client.
//!
//! A single YAML file (`~/.config/backoffice/client.yaml`) carries the API
//! origin, request timeout, session storage location and cache settings.
//! The API origin can be overridden per invocation or through
//! `BACKOFFICE_API_URL`.

pub mod client;
pub mod error;
pub mod paths;

pub use client::{
    API_URL_ENV, CacheSettings, ClientConfig, DEFAULT_API_URL, client_config_path,
    load_client_config, load_client_config_from, save_client_config, save_client_config_to,
};
pub use error::{ConfigError, Result};
pub use paths::{APP_NAME, CONFIG_DIR_ENV, expand_path, xdg_config_dir};
