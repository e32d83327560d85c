use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

struct Entry<V> {
    stored_at: Instant,
    value: Arc<V>,
}

/// Time-windowed memoization keyed by the scanner's argument tuple. Entries
/// are immutable once stored; a lookup after the window expires recomputes.
pub struct TimedCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let entries = self.entries.lock().expect("cache lock poisoned");

        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        let mut entries = self.entries.lock().expect("cache lock poisoned");

        entries.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                value: value.clone(),
            },
        );

        value
    }

    /// The lock is not held while `f` runs: simultaneous misses on the same
    /// key may recompute in duplicate and the last writer wins.
    pub fn get_or_try_insert_with<F, E>(&self, key: K, f: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        Ok(self.insert(key, f()?))
    }
}
