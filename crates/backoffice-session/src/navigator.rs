//! Hard navigation hook.

use tracing::info;

/// Performs a full navigation that discards in-memory application state.
pub trait Navigator: Send + Sync {
    /// Navigate to `location`.
    fn assign(&self, location: &str);
}

/// Navigator that only records the redirect in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn assign(&self, location: &str) {
        info!(location, "hard redirect");
    }
}
