//! Bearer token capability consumed by the client.
//!
//! The client only needs to ask "what is the current token?". Anything that
//! can answer implements [`TokenSource`]: the session store, a fixed token,
//! or a closure.

/// Provides the current bearer token, if any.
pub trait TokenSource: Send + Sync {
    /// Return the token to send with the next request.
    fn token(&self) -> Option<String>;
}

/// Token source that never yields a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenSource for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// Token source that always yields the same token.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

impl<F> TokenSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_closure_is_a_token_source() {
        let source: Arc<dyn TokenSource> = Arc::new(|| Some("abc".to_string()));
        assert_eq!(source.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_builtin_sources() {
        assert!(NoToken.token().is_none());
        assert_eq!(StaticToken("t".into()).token().as_deref(), Some("t"));
    }
}
