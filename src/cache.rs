use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Entry stored in the map with an expiry timestamp.
#[derive(Clone)]
pub(crate) struct CacheEntry {
    value: String,
    pub(crate) expires_at: Instant,
}

/// Short-TTL cache for the panel's read operations (account, user, prompt
/// and permission listings). The remote API stays the source of truth:
/// this only trims redundant calls between renders, so entries are checked
/// on read and evicted lazily.
///
/// Invalidation is coarse: any successful mutation calls `clear()` rather
/// than computing which keys could be stale.
#[derive(Clone, Default)]
pub struct ReadCache {
    entries: Arc<DashMap<String, CacheEntry>>,
}

pub mod keys {
    pub const ACCOUNTS: &str = "accounts";
    pub const PROMPTS: &str = "prompts";

    pub fn users(account_id: i64) -> String {
        format!("users:{account_id}")
    }

    pub fn permissions(account_id: i64) -> String {
        format!("permissions:{account_id}")
    }
}

impl ReadCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if let Some(entry) = self.entries.get(key) {
            if Instant::now() < entry.expires_at {
                return serde_json::from_str(&entry.value).ok();
            }
            // expired — drop the ref before removing
            drop(entry);
            self.entries.remove(key);
        }
        None
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let Ok(json) = serde_json::to_string(value) else {
            return;
        };
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: json,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Coarse invalidation after any successful mutation.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Remove all expired entries. Useful for long-lived sessions to bound
    /// memory; correctness never depends on it.
    pub fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_typed_values() {
        let cache = ReadCache::new();
        cache.set(keys::ACCOUNTS, &vec![1i64, 2, 3], Duration::from_secs(30));
        let got: Vec<i64> = cache.get(keys::ACCOUNTS).unwrap();
        assert_eq!(got, vec![1, 2, 3]);
    }

    #[test]
    fn expired_entries_are_not_returned() {
        let cache = ReadCache::new();
        cache.set("k", &"v".to_string(), Duration::from_secs(0));
        let got: Option<String> = cache.get("k");
        assert!(got.is_none());
        assert!(cache.is_empty(), "expired entry should be lazily evicted");
    }

    #[test]
    fn clear_drops_everything() {
        let cache = ReadCache::new();
        cache.set(keys::ACCOUNTS, &1i64, Duration::from_secs(30));
        cache.set(&keys::users(7), &2i64, Duration::from_secs(30));
        cache.clear();
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn evict_expired_counts_removals() {
        let cache = ReadCache::new();
        cache.set("live", &1i64, Duration::from_secs(60));
        cache.set("dead", &2i64, Duration::from_secs(0));
        assert_eq!(cache.evict_expired(), 1);
        assert_eq!(cache.len(), 1);
    }
}
