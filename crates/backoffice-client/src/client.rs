//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::api::{AuthApi, RolesApi, UsersApi};
use crate::cache::{DEFAULT_CACHE_CAPACITY, ResponseCache, cache_key};
use crate::error::{Error, Result};
use crate::request::{Method, RequestOptions};
use crate::token::{NoToken, TokenSource};

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default freshness window for cached GET responses.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_millis(120_000);

/// Admin API client.
///
/// Cloning is cheap; clones share the HTTP pool, the response cache and the
/// token source.
///
/// # Example
///
/// ```no_run
/// use backoffice_client::{ApiClient, StaticToken};
///
/// # async fn example() -> backoffice_client::Result<()> {
/// let client = ApiClient::builder()
///     .base_url("http://localhost:5175")
///     .build()?;
/// client.set_token_source(std::sync::Arc::new(StaticToken("abc".into())));
///
/// let roles = client.roles().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    default_cache_ttl: Duration,
    cache: ResponseCache,
    token_source: RwLock<Arc<dyn TokenSource>>,
}

impl ApiClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Replace the token source used for subsequent requests.
    pub fn set_token_source(&self, source: Arc<dyn TokenSource>) {
        *self.inner.token_source.write() = source;
    }

    /// The token the next request would carry.
    pub fn current_token(&self) -> Option<String> {
        self.inner.token_source.read().token()
    }

    /// Drop every cached response.
    pub fn clear_cache(&self) {
        self.inner.cache.clear();
    }

    /// Number of cached responses, stale ones included.
    pub fn cached_entries(&self) -> usize {
        self.inner.cache.len()
    }

    /// Access the users API.
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Access the roles API.
    pub fn roles(&self) -> RolesApi {
        RolesApi::new(self.clone())
    }

    /// Access the auth API.
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner.base_url.join(path).map_err(Error::from)
    }

    /// Issue a request, serving GETs from the cache while they are fresh.
    ///
    /// A GET response is cached only once it has been converted to `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let RequestOptions {
            method,
            body,
            cache_ttl,
        } = options;
        let key = cache_key(method, path, body.as_ref());
        let ttl = cache_ttl.unwrap_or(self.inner.default_cache_ttl);

        if method == Method::Get {
            if let Some(data) = self.inner.cache.get_fresh(&key, ttl) {
                debug!(%key, "cache hit");
                return Ok(T::deserialize(&data)?);
            }
            debug!(%key, "cache miss");
        }

        let data = self.send(method, path, body.as_ref()).await?;
        let parsed = T::deserialize(&data)?;

        if method == Method::Get {
            self.inner.cache.insert(key, data);
        }
        Ok(parsed)
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = self.url(path)?;
        let mut request = self
            .inner
            .http
            .request(method.to_reqwest(), url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .timeout(self.inner.timeout);

        if let Some(token) = self.current_token() {
            request = request.header(AUTHORIZATION, bearer(&token)?);
        }
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        debug!(%method, path, "sending request");
        let response = request.send().await?;
        self.handle_response(method, path, response).await
    }

    /// Handle a response, extracting the body or error.
    async fn handle_response(
        &self,
        method: Method,
        path: &str,
        response: reqwest::Response,
    ) -> Result<Value> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(%method, path, "request unauthorized");
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.ok();
            warn!(%method, path, status = status.as_u16(), "request failed");
            return Err(Error::http(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn bearer(token: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| Error::Config("invalid auth token".to_string()))
}

/// Builder for creating an [`ApiClient`].
pub struct ClientBuilder {
    base_url: Option<String>,
    token_source: Option<Arc<dyn TokenSource>>,
    timeout: Duration,
    default_cache_ttl: Duration,
    cache_capacity: usize,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            token_source: None,
            timeout: DEFAULT_TIMEOUT,
            default_cache_ttl: DEFAULT_CACHE_TTL,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            user_agent: None,
        }
    }

    /// Set the base URL for the API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the initial token source.
    pub fn token_source(mut self, source: Arc<dyn TokenSource>) -> Self {
        self.token_source = Some(source);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the TTL used by GETs that don't specify one.
    pub fn default_cache_ttl(mut self, ttl: Duration) -> Self {
        self.default_cache_ttl = ttl;
        self
    }

    /// Set the maximum number of cached responses.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("backoffice-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()?;

        let token_source = self.token_source.unwrap_or_else(|| Arc::new(NoToken));

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                default_cache_ttl: self.default_cache_ttl,
                cache: ResponseCache::new(self.cache_capacity),
                token_source: RwLock::new(token_source),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
