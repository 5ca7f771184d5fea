//! Client configuration file.
//!
//! ```yaml
//! api-url: https://admin-api.example.com
//! timeout: 30
//! storage-path: ~/.config/backoffice/session.json
//! cache:
//!   default-ttl-ms: 120000
//!   capacity: 1024
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::paths::{expand_path, xdg_config_dir};
use crate::{ConfigError, Result};

/// Origin used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5175";

/// Environment variable overriding the API origin.
pub const API_URL_ENV: &str = "BACKOFFICE_API_URL";

/// Default config filename.
const CLIENT_CONFIG_FILE: &str = "client.yaml";

/// Default session storage filename.
const SESSION_FILE: &str = "session.json";

// ─────────────────────────────────────────────────────────────────────────────
// Client Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClientConfig {
    /// API origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Where the session is persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,

    /// Response cache settings.
    pub cache: CacheSettings,
}

impl ClientConfig {
    /// Parse from a YAML string.
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        serde_yaml::from_str(yaml_str).map_err(|e| ConfigError::ParseYaml(e.to_string()))
    }

    /// Serialize to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::ParseYaml(e.to_string()))
    }

    /// Effective API origin for this process.
    ///
    /// Resolution order:
    /// 1. `cli_override` (the `--api-url` flag)
    /// 2. `BACKOFFICE_API_URL` environment variable
    /// 3. `api-url` from the config file
    /// 4. [`DEFAULT_API_URL`]
    pub fn resolve_api_url(&self, cli_override: Option<&str>) -> String {
        self.resolve_api_url_with(cli_override, std::env::var(API_URL_ENV).ok())
    }

    /// [`resolve_api_url`](Self::resolve_api_url) with the environment value supplied.
    pub fn resolve_api_url_with(&self, cli_override: Option<&str>, env: Option<String>) -> String {
        [cli_override.map(str::to_string), env, self.api_url.clone()]
            .into_iter()
            .flatten()
            .find(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Request timeout, defaulting to 30 seconds.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(30))
    }

    /// Effective session storage path.
    pub fn storage_path(&self) -> PathBuf {
        match &self.storage_path {
            Some(path) => expand_path(path),
            None => xdg_config_dir()
                .map(|d| d.join(SESSION_FILE))
                .unwrap_or_else(|| PathBuf::from(SESSION_FILE)),
        }
    }
}

/// Response cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CacheSettings {
    /// TTL applied to GETs that don't set their own, in milliseconds.
    pub default_ttl_ms: u64,

    /// Maximum number of cached responses.
    pub capacity: usize,
}

impl CacheSettings {
    /// Default TTL as a duration.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            default_ttl_ms: 120_000,
            capacity: 1024,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading / Saving
// ─────────────────────────────────────────────────────────────────────────────

/// Get the path to the client config file.
pub fn client_config_path() -> Option<PathBuf> {
    xdg_config_dir().map(|d| d.join(CLIENT_CONFIG_FILE))
}

/// Load the client configuration.
///
/// Returns a default config if the file doesn't exist.
pub fn load_client_config() -> Result<ClientConfig> {
    load_client_config_from(client_config_path().as_deref())
}

/// Load client config from a specific path.
pub fn load_client_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let Some(path) = path else {
        return Ok(ClientConfig::default());
    };

    if !path.exists() {
        return Ok(ClientConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;

    ClientConfig::from_yaml(&contents)
}

/// Save the client configuration.
pub fn save_client_config(config: &ClientConfig) -> Result<()> {
    let path = client_config_path()
        .ok_or_else(|| ConfigError::Other("Could not determine config directory".to_string()))?;
    save_client_config_to(config, &path)
}

/// Save client config to a specific path.
pub fn save_client_config_to(config: &ClientConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let contents = config.to_yaml()?;
    std::fs::write(path, contents).map_err(|e| ConfigError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
