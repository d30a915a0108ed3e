//! The cache capability and its TTL map implementation.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};

/// Default time-to-live for lookups against the remote chassis master.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60 * 24);

/// Default entry cap for a [`TtlCache`].
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// A key-value cache.
///
/// Implementations decide expiry and eviction; callers only see hits and
/// misses. A `set` on an existing key replaces the value and restarts its
/// lifetime.
pub trait Cache<K, V>: Send + Sync {
    /// Get a live value, or `None` on a miss or expired entry.
    fn get(&self, key: &K) -> Option<V>;

    /// Store a value.
    fn set(&self, key: K, value: V);
}

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Process-local cache whose entries expire a fixed time after they are set.
///
/// Expired entries are served as misses. Every `set` drops expired entries
/// and, at capacity, evicts the oldest one. There is no background refresh
/// and no invalidation on upstream writes.
pub struct TtlCache<K, V, C = SystemClock> {
    ttl: Duration,
    max_entries: usize,
    clock: C,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K, V> TtlCache<K, V, SystemClock>
where
    K: Eq + Hash,
{
    /// Create a cache using the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<K, V, C> TtlCache<K, V, C>
where
    K: Eq + Hash,
    C: Clock,
{
    /// Create a cache with an explicit time source.
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            max_entries: DEFAULT_MAX_ENTRIES,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Set the entry cap. Never below 1.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    /// Configured entry cap.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, including ones that have expired but not yet
    /// been dropped.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| is_fresh(entry.stored_at, now, self.ttl));
        before - entries.len()
    }
}

fn is_fresh(stored_at: Instant, now: Instant, ttl: Duration) -> bool {
    now.saturating_duration_since(stored_at) < ttl
}

impl<K, V, C> Cache<K, V> for TtlCache<K, V, C>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
    C: Clock,
{
    fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(entry) if is_fresh(entry.stored_at, now, self.ttl) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                tracing::trace!("cache entry expired");
                None
            }
            None => None,
        }
    }

    fn set(&self, key: K, value: V) {
        let stored_at = self.clock.now();
        let mut entries = self.entries.lock();

        entries.retain(|_, entry| is_fresh(entry.stored_at, stored_at, self.ttl));
        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                tracing::trace!("cache full, evicted oldest entry");
            }
        }
        entries.insert(key, Entry { value, stored_at });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn cache(ttl_secs: u64) -> (TtlCache<String, String, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let cache = TtlCache::with_clock(Duration::from_secs(ttl_secs), clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_get_returns_value_before_expiry() {
        let (cache, clock) = cache(60);
        cache.set("k".to_string(), "v".to_string());

        clock.advance(Duration::from_secs(59));

        assert_eq!(cache.get(&"k".to_string()), Some("v".to_string()));
    }

    #[test]
    fn test_entry_expires_at_ttl() {
        let (cache, clock) = cache(60);
        cache.set("k".to_string(), "v".to_string());

        clock.advance(Duration::from_secs(60));

        assert_eq!(cache.get(&"k".to_string()), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_restarts_lifetime() {
        let (cache, clock) = cache(60);
        cache.set("k".to_string(), "old".to_string());
        clock.advance(Duration::from_secs(50));
        cache.set("k".to_string(), "new".to_string());
        clock.advance(Duration::from_secs(50));

        assert_eq!(cache.get(&"k".to_string()), Some("new".to_string()));
    }

    #[test]
    fn test_miss_on_unknown_key() {
        let (cache, _clock) = cache(60);
        assert_eq!(cache.get(&"missing".to_string()), None);
    }

    #[test]
    fn test_purge_expired() {
        let (cache, clock) = cache(10);
        cache.set("a".to_string(), "1".to_string());
        clock.advance(Duration::from_secs(5));
        cache.set("b".to_string(), "2".to_string());
        clock.advance(Duration::from_secs(6));

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"b".to_string()), Some("2".to_string()));
    }

    #[test]
    fn test_set_drops_expired_entries() {
        let (cache, clock) = cache(60);
        for i in 0..1000 {
            cache.set(format!("validate:{i}"), "v".to_string());
        }
        clock.advance(Duration::from_secs(61));

        cache.set("fresh".to_string(), "v".to_string());

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"fresh".to_string()), Some("v".to_string()));
    }

    #[test]
    fn test_full_cache_evicts_oldest() {
        let (cache, clock) = cache(60);
        let cache = cache.with_max_entries(2);
        cache.set("a".to_string(), "1".to_string());
        clock.advance(Duration::from_secs(1));
        cache.set("b".to_string(), "2".to_string());
        clock.advance(Duration::from_secs(1));
        cache.set("c".to_string(), "3".to_string());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a".to_string()), None);
        assert_eq!(cache.get(&"b".to_string()), Some("2".to_string()));
        assert_eq!(cache.get(&"c".to_string()), Some("3".to_string()));
    }

    #[test]
    fn test_replacing_a_key_at_capacity_keeps_others() {
        let (cache, _clock) = cache(60);
        let cache = cache.with_max_entries(2);
        cache.set("a".to_string(), "1".to_string());
        cache.set("b".to_string(), "2".to_string());
        cache.set("b".to_string(), "3".to_string());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a".to_string()), Some("1".to_string()));
    }

    #[test]
    fn test_usable_as_trait_object() {
        let cache: Box<dyn Cache<String, u32>> = Box::new(TtlCache::<String, u32>::new(DEFAULT_TTL));
        cache.set("n".to_string(), 3);
        assert_eq!(cache.get(&"n".to_string()), Some(3));
    }
}
