//! Caller-owned freshness cache for computed reports.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Source of "now" for freshness checks.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut elapsed = self
            .elapsed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *elapsed += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let elapsed = self
            .elapsed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.origin + *elapsed
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Entries are served only while younger than the TTL.
#[derive(Debug)]
pub struct FreshnessCache<K, V, C = SystemClock> {
    ttl: Duration,
    clock: C,
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V> FreshnessCache<K, V, SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<K: Eq + Hash, V, C: Clock> FreshnessCache<K, V, C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            clock,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| &entry.value)
    }

    pub fn insert(&mut self, key: K, value: V) {
        let stored_at = self.clock.now();
        self.purge_expired();
        self.entries.insert(key, Entry { value, stored_at });
    }

    pub fn invalidate(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|entry| entry.value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn purge_expired(&mut self) {
        let now = self.clock.now();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.stored_at) < ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn cache(clock: &Arc<ManualClock>) -> FreshnessCache<&'static str, u8, Arc<ManualClock>> {
        FreshnessCache::with_clock(Duration::from_secs(300), Arc::clone(clock))
    }

    #[test]
    fn serves_entries_until_ttl_elapses() {
        let clock = Arc::new(ManualClock::new());
        let mut cache = cache(&clock);
        cache.insert("iglesia-central", 72);

        clock.advance(Duration::from_secs(299));
        assert_eq!(cache.get(&"iglesia-central"), Some(&72));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get(&"iglesia-central"), None);
    }

    #[test]
    fn invalidate_and_clear_drop_entries() {
        let clock = Arc::new(ManualClock::new());
        let mut cache = cache(&clock);
        cache.insert("a", 1);
        cache.insert("b", 2);

        assert_eq!(cache.invalidate(&"a"), Some(1));
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_purges_stale_entries() {
        let clock = Arc::new(ManualClock::new());
        let mut cache = cache(&clock);
        cache.insert("old", 1);
        clock.advance(Duration::from_secs(600));
        cache.insert("new", 2);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"new"), Some(&2));
    }

    #[test]
    fn zero_ttl_never_serves() {
        let mut cache: FreshnessCache<u8, u8> = FreshnessCache::new(Duration::ZERO);
        cache.insert(1, 1);
        assert_eq!(cache.get(&1), None);
    }
}
