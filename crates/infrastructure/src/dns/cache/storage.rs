use super::entry::CachedResponse;
use super::key::CacheKey;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::time::{Duration, Instant};

/// Concurrent response cache.
///
/// No size bound is specified, so this never evicts on its own — entries
/// only leave the map when [`ResponseCache::get`] notices one has expired.
/// There is no background reaper; expiry is checked lazily, on read.
pub struct ResponseCache {
    entries: DashMap<CacheKey, CachedResponse, FxBuildHasher>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Returns the cached response for `key`, if present and not expired.
    /// An expired entry is removed and treated as a miss.
    pub fn get(&self, key: &CacheKey) -> Option<CachedResponse> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => return None,
        };

        if expired {
            self.entries.remove(key);
            return None;
        }

        self.entries.get(key).map(|entry| entry.clone())
    }

    /// Inserts a response that expires `ttl` seconds from now.
    pub fn set(&self, key: CacheKey, response: CachedResponse, ttl: Duration) {
        let mut response = response;
        response.expires_at = Some(Instant::now() + ttl);
        self.entries.insert(key, response);
    }

    /// Inserts a response that never expires — used for overrides.
    pub fn set_permanent(&self, key: CacheKey, mut response: CachedResponse) {
        response.expires_at = None;
        self.entries.insert(key, response);
    }

    pub fn item_count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
