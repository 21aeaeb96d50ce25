use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::models::MovieId;

/// Capacity-bounded map with least-recently-used eviction
///
/// Every read or write stamps the entry with a monotonically increasing tick.
/// `order` maps ticks back to keys, so its first entry is always the
/// least-recently-used key.
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    tick: u64,
    entries: HashMap<K, (V, u64)>,
    order: BTreeMap<u64, K>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tick: 0,
            entries: HashMap::with_capacity(capacity),
            order: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns a clone of the cached value and marks it most recently used
    pub fn get(&mut self, key: &K) -> Option<V> {
        let next = self.next_tick();
        let (value, stamp) = self.entries.get_mut(key)?;
        self.order.remove(&*stamp);
        *stamp = next;
        self.order.insert(next, key.clone());
        Some(value.clone())
    }

    /// Inserts or refreshes a value, evicting the least-recently-used entry
    /// when a new key would exceed capacity. Returns the evicted key.
    pub fn put(&mut self, key: K, value: V) -> Option<K> {
        if self.capacity == 0 {
            return None;
        }

        let next = self.next_tick();
        if let Some((existing, stamp)) = self.entries.get_mut(&key) {
            self.order.remove(&*stamp);
            *existing = value;
            *stamp = next;
            self.order.insert(next, key);
            return None;
        }

        let mut evicted = None;
        if self.entries.len() >= self.capacity {
            if let Some((_, oldest)) = self.order.pop_first() {
                self.entries.remove(&oldest);
                evicted = Some(oldest);
            }
        }

        self.order.insert(next, key.clone());
        self.entries.insert(key, (value, next));
        evicted
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

/// Process-wide poster URL memo shared between requests
#[derive(Clone)]
pub struct Cache {
    inner: Arc<Mutex<LruCache<MovieId, String>>>,
}

impl Cache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Retrieves a cached poster URL, refreshing its recency
    pub async fn get_from_cache(&self, key: &MovieId) -> Option<String> {
        self.inner.lock().await.get(key)
    }

    /// Stores a poster URL, evicting the least-recently-used id if full
    pub async fn set(&self, key: &MovieId, value: String) {
        let evicted = self.inner.lock().await.put(*key, value);
        if let Some(evicted) = evicted {
            tracing::debug!(movie_id = evicted, "Evicted poster from cache");
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn contains(&self, key: &MovieId) -> bool {
        self.inner.lock().await.contains(key)
    }
}
