//! Client error types.

use thiserror::Error;

/// Message carried by [`Error::Unauthorized`].
pub const UNAUTHORIZED: &str = "UNAUTHORIZED";

/// Prefix of the fallback message used when a failed response has no body.
pub const HTTP_FALLBACK_PREFIX: &str = "HTTP_";

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered 401.
    #[error("{UNAUTHORIZED}")]
    Unauthorized,

    /// The server answered with any other non-success status.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body text, or `HTTP_<status>` when the body was empty.
        message: String,
    },

    /// Transport-level failure (connection refused, DNS, timeout, ...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A resource ID that can't be used as a single path segment.
    #[error("invalid resource id '{0}'")]
    InvalidId(String),

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build an HTTP error from a status and the (possibly empty) body text.
    pub(crate) fn http(status: u16, body: Option<String>) -> Self {
        let message = match body {
            Some(text) if !text.trim().is_empty() => text,
            _ => format!("{HTTP_FALLBACK_PREFIX}{status}"),
        };
        Error::Http { status, message }
    }

    /// The message a caller would classify on.
    ///
    /// `UNAUTHORIZED` for 401, the server text for other HTTP failures and the
    /// display text for everything else.
    pub fn message(&self) -> String {
        match self {
            Error::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Check if this is an authentication error.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Http { status: 404, .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Http { status, .. } if *status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_uses_body_text() {
        let err = Error::http(409, Some("email already taken".to_string()));
        assert_eq!(err.message(), "email already taken");
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_http_falls_back_to_status() {
        let err = Error::http(503, Some("   ".to_string()));
        assert_eq!(err.message(), "HTTP_503");
        assert!(err.is_server_error());

        let err = Error::http(404, None);
        assert_eq!(err.message(), "HTTP_404");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unauthorized_message() {
        assert_eq!(Error::Unauthorized.message(), "UNAUTHORIZED");
        assert!(Error::Unauthorized.is_unauthorized());
    }
}
