//! Filesystem locations.

use std::path::{Path, PathBuf};

/// Directory name under the platform config dir.
pub const APP_NAME: &str = "backoffice";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "BACKOFFICE_CONFIG_DIR";

/// The config directory: `$BACKOFFICE_CONFIG_DIR`, else `<config dir>/backoffice`.
pub fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Expand a leading `~/` to the home directory.
pub fn expand_path(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/"))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
