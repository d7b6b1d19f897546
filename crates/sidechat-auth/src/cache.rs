//! In-memory TTL cache for session tokens.
//!
//! Entries expire a fixed duration after insertion and read as absent
//! thereafter. Expiry is checked on read against a caller-supplied instant
//! so the boundary is exactly testable; the plain `get`/`insert` methods
//! sample `Instant::now()`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Default token lifetime. The remote session token outlives this, but ten
/// seconds keeps a stale token from being reused long after a logout.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10);

struct CacheEntry {
    value: String,
    inserted_at: Instant,
}

/// Thread-safe expiring key/value store for tokens.
pub struct TokenCache {
    inner: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl TokenCache {
    /// Create a cache with the given entry lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Get a cached value. Returns `None` on miss or expired entry.
    pub fn get(&self, key: &str) -> Option<String> {
        self.get_at(key, Instant::now())
    }

    /// Get a cached value, treating `now` as the current instant.
    pub fn get_at(&self, key: &str, now: Instant) -> Option<String> {
        let mut inner = self.inner.lock();
        match inner.get(key) {
            Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                Some(entry.value.clone())
            }
            Some(_) => {
                inner.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert a value, restarting its TTL.
    pub fn insert(&self, key: &str, value: &str) {
        self.insert_at(key, value, Instant::now());
    }

    /// Insert a value stamped with `now` as its insertion instant.
    pub fn insert_at(&self, key: &str, value: &str, now: Instant) {
        self.inner.lock().insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                inserted_at: now,
            },
        );
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_is_readable() {
        let cache = TokenCache::default();
        let t0 = Instant::now();
        cache.insert_at("accessToken", "tok", t0);
        assert_eq!(
            cache.get_at("accessToken", t0 + Duration::from_secs(9)),
            Some("tok".into())
        );
    }

    #[test]
    fn test_entry_expires_at_ttl_boundary() {
        let cache = TokenCache::default();
        let t0 = Instant::now();
        cache.insert_at("accessToken", "tok", t0);
        // Absent at exactly +10s and beyond.
        assert_eq!(cache.get_at("accessToken", t0 + Duration::from_secs(10)), None);
        assert_eq!(cache.get_at("accessToken", t0 + Duration::from_secs(60)), None);
    }

    #[test]
    fn test_reinsert_restarts_ttl() {
        let cache = TokenCache::default();
        let t0 = Instant::now();
        cache.insert_at("accessToken", "old", t0);
        cache.insert_at("accessToken", "new", t0 + Duration::from_secs(8));
        assert_eq!(
            cache.get_at("accessToken", t0 + Duration::from_secs(15)),
            Some("new".into())
        );
    }

    #[test]
    fn test_missing_key() {
        let cache = TokenCache::default();
        assert_eq!(cache.get("nope"), None);
    }
}
