//! In-memory TTL cache for lookup results
//!
//! Entries live at most `ttl` and are reclaimed two ways sharing one
//! staleness predicate: lazily on read, and proactively by [`LookupCache::sweep`]
//! (driven by a background task) so keys that are looked up once and never
//! read again do not accumulate. No size cap; the TTL bounds per-entry
//! lifetime, the sweeper bounds growth between reads.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::normalize::NormalizedKey;

#[derive(Debug)]
struct CacheEntry {
    payload: Value,
    stored_at: Instant,
}

impl CacheEntry {
    fn is_stale(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.stored_at) > ttl
    }
}

/// Shared lookup cache, safe for concurrent `get`/`put`/`sweep`
///
/// Constructed at startup and injected where needed; tests instantiate
/// isolated stores with short TTLs.
#[derive(Debug)]
pub struct LookupCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl LookupCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a payload, removing it if it has outlived the TTL
    pub fn get(&self, key: &NormalizedKey) -> Option<Value> {
        let cache_key = key.cache_key();
        let mut entries = self.lock();
        let now = Instant::now();

        match entries.get(&cache_key) {
            Some(entry) if !entry.is_stale(now, self.ttl) => Some(entry.payload.clone()),
            Some(_) => {
                entries.remove(&cache_key);
                None
            }
            None => None,
        }
    }

    /// Store a payload, replacing any existing entry for the key wholesale
    pub fn put(&self, key: &NormalizedKey, payload: Value) {
        self.lock().insert(
            key.cache_key(),
            CacheEntry {
                payload,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop every stale entry, returning how many were removed
    pub fn sweep(&self) -> usize {
        let mut entries = self.lock();
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_stale(now, self.ttl));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned lock only means another thread panicked mid-operation; the
    // map itself is still structurally sound, so keep serving from it.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CACHE_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;
    use std::thread::sleep;

    fn key(platform: &str, identity: &str) -> NormalizedKey {
        normalize(platform, identity).unwrap()
    }

    #[test]
    fn test_get_before_ttl_returns_payload_unchanged() {
        let cache = LookupCache::new(Duration::from_secs(60));
        let k = key("ens", "vitalik.eth");
        let payload = json!({"identity": {"platform": "ens", "identity": "vitalik.eth"}});

        cache.put(&k, payload.clone());
        assert_eq!(cache.get(&k), Some(payload));
    }

    #[test]
    fn test_get_after_ttl_is_absent_and_removes_entry() {
        let cache = LookupCache::new(Duration::from_millis(30));
        let k = key("ens", "vitalik.eth");
        cache.put(&k, json!({"ok": true}));

        sleep(Duration::from_millis(50));
        assert_eq!(cache.get(&k), None);
        // Lazy expiry deleted the entry, not just hid it
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_put_overwrites_with_fresh_timestamp() {
        let cache = LookupCache::new(Duration::from_millis(80));
        let k = key("ens", "vitalik.eth");

        cache.put(&k, json!({"version": 1}));
        sleep(Duration::from_millis(50));
        cache.put(&k, json!({"version": 2}));
        sleep(Duration::from_millis(50));

        // 100ms after the first put, but only 50ms after the refresh
        assert_eq!(cache.get(&k), Some(json!({"version": 2})));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_sweep_removes_only_stale_entries() {
        let cache = LookupCache::new(Duration::from_millis(40));
        cache.put(&key("ens", "old1"), json!(1));
        cache.put(&key("ens", "old2"), json!(2));
        sleep(Duration::from_millis(60));
        cache.put(&key("ens", "fresh"), json!(3));

        assert_eq!(cache.sweep(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key("ens", "fresh")), Some(json!(3)));
    }

    #[test]
    fn test_sweep_on_empty_cache() {
        let cache = LookupCache::new(Duration::from_secs(1));
        assert_eq!(cache.sweep(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_distinct_keys_do_not_collide() {
        let cache = LookupCache::new(Duration::from_secs(60));
        cache.put(&key("ens", "alice.eth"), json!("a"));
        cache.put(&key("lens", "alice.eth"), json!("b"));

        assert_eq!(cache.get(&key("ens", "alice.eth")), Some(json!("a")));
        assert_eq!(cache.get(&key("lens", "alice.eth")), Some(json!("b")));
    }

    #[test]
    fn test_concurrent_put_and_sweep() {
        use std::sync::Arc;

        let cache = Arc::new(LookupCache::new(Duration::from_millis(10)));
        let writer = {
            let cache = cache.clone();
            std::thread::spawn(move || {
                for i in 0..200 {
                    cache.put(&key("ens", &format!("user{i}")), json!(i));
                }
            })
        };
        let sweeper = {
            let cache = cache.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    cache.sweep();
                }
            })
        };

        writer.join().unwrap();
        sweeper.join().unwrap();
        // No duplicates possible per key; just confirm the map is usable
        cache.put(&key("ens", "final"), json!("ok"));
        assert_eq!(cache.get(&key("ens", "final")), Some(json!("ok")));
    }
}
