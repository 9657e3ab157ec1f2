//! Short-lived response cache for the content API
//!
//! The CMS is an eventually-consistent read source, so a fixed freshness
//! window is enough: within the TTL the stored body is served, after it the
//! endpoint is fetched again. No invalidation, no consistency guarantee.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct CacheSlot {
    body: String,
    stored_at: Instant,
}

/// In-memory TTL cache keyed by endpoint
pub struct ResponseCache {
    ttl: Duration,
    slots: Mutex<HashMap<String, CacheSlot>>,
}

impl ResponseCache {
    /// Create a cache with the given freshness window; zero disables caching
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            ttl: Duration::from_secs(ttl_seconds),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the stored body for an endpoint if still fresh
    pub fn get(&self, endpoint: &str) -> Option<String> {
        if self.ttl.is_zero() {
            return None;
        }
        let slots = self.slots.lock().ok()?;
        let slot = slots.get(endpoint)?;
        if slot.stored_at.elapsed() < self.ttl {
            Some(slot.body.clone())
        } else {
            None
        }
    }

    /// Store a response body, evicting any stale entry for the endpoint
    pub fn put(&self, endpoint: &str, body: &str) {
        if self.ttl.is_zero() {
            return;
        }
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(
                endpoint.to_string(),
                CacheSlot {
                    body: body.to_string(),
                    stored_at: Instant::now(),
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_is_served() {
        let cache = ResponseCache::new(60);
        cache.put("/posts", "{}");
        assert_eq!(cache.get("/posts").as_deref(), Some("{}"));
        assert!(cache.get("/other").is_none());
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        let cache = ResponseCache::new(0);
        cache.put("/posts", "{}");
        assert!(cache.get("/posts").is_none());
    }
}
