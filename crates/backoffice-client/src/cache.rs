//! In-memory cache for GET responses.
//!
//! Entries are never swept. A lookup compares the entry's age against the TTL
//! of the *reading* call, so a stale entry is simply ignored and later
//! overwritten by the next successful GET for the same key. The map is capped
//! with LRU eviction; the cap is the only bound on its size.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::trace;

use crate::request::Method;

/// Default maximum number of cached responses.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// A cached response body.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Composite request signature.
    pub key: String,
    /// When the response was stored.
    pub timestamp: Instant,
    /// Parsed response body.
    pub data: Value,
}

impl CacheEntry {
    /// Whether the entry is still fresh for the given TTL.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.timestamp.elapsed() < ttl
    }
}

/// Build the cache key for a request: `METHOD:path:json(body)`.
pub fn cache_key(method: Method, path: &str, body: Option<&Value>) -> String {
    let body = body.map(Value::to_string).unwrap_or_default();
    format!("{}:{}:{}", method.as_str(), path, body)
}

/// Thread-safe response cache keyed by request signature.
pub struct ResponseCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
}

impl ResponseCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Return the cached data for `key` if it is younger than `ttl`.
    pub fn get_fresh(&self, key: &str, ttl: Duration) -> Option<Value> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_fresh(ttl) => Some(entry.data.clone()),
            Some(_) => {
                trace!(key, "cache entry stale");
                None
            }
            None => None,
        }
    }

    /// Store (or overwrite) the data for `key`, stamped with the current time.
    pub fn insert(&self, key: String, data: Value) {
        let entry = CacheEntry {
            key: key.clone(),
            timestamp: Instant::now(),
            data,
        };
        self.entries.lock().put(key, entry);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_cache_key_format() {
        assert_eq!(cache_key(Method::Get, "/roles", None), "GET:/roles:");
        assert_eq!(
            cache_key(Method::Post, "/roles", Some(&json!({"name": "admin"}))),
            r#"POST:/roles:{"name":"admin"}"#
        );
    }

    #[test]
    fn test_fresh_entry_is_returned() {
        let cache = ResponseCache::default();
        cache.insert("GET:/roles:".into(), json!([1, 2]));
        assert_eq!(
            cache.get_fresh("GET:/roles:", Duration::from_secs(60)),
            Some(json!([1, 2]))
        );
    }

    #[test]
    fn test_stale_entry_is_ignored_but_kept() {
        let cache = ResponseCache::default();
        cache.insert("k".into(), json!(1));
        thread::sleep(Duration::from_millis(20));

        assert!(cache.get_fresh("k", Duration::from_millis(10)).is_none());
        // Staleness depends on the reader's TTL, not on the entry.
        assert_eq!(cache.get_fresh("k", Duration::from_secs(60)), Some(json!(1)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_ttl_never_hits() {
        let cache = ResponseCache::default();
        cache.insert("k".into(), json!(1));
        assert!(cache.get_fresh("k", Duration::ZERO).is_none());
    }

    #[test]
    fn test_overwrite_and_capacity() {
        let cache = ResponseCache::new(2);
        cache.insert("a".into(), json!(1));
        cache.insert("a".into(), json!(2));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_fresh("a", Duration::from_secs(1)), Some(json!(2)));

        cache.insert("b".into(), json!(3));
        cache.insert("c".into(), json!(4));
        assert_eq!(cache.len(), 2);
        assert!(cache.get_fresh("a", Duration::from_secs(1)).is_none());

        cache.clear();
        assert!(cache.is_empty());
    }
}
