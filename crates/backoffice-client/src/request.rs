//! Per-request options for [`ApiClient::request`](crate::ApiClient::request).

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// HTTP methods used by the admin API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a single request.
///
/// `cache_ttl` only matters for GET; `None` means the client's default TTL.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub cache_ttl: Option<Duration>,
}

impl RequestOptions {
    /// A GET request.
    pub fn get() -> Self {
        Self::default()
    }

    /// A GET request with an explicit cache TTL.
    pub fn get_cached(ttl: Duration) -> Self {
        Self {
            cache_ttl: Some(ttl),
            ..Self::default()
        }
    }

    /// A request with the given method and no body.
    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Attach a JSON body.
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Override the cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }
}
