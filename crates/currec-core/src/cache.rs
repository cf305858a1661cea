//! Bounded LRU cache for reconciliation query results.
//!
//! Results are cheap to recompute but the UI issues the same query many
//! times during rapid interaction, so the engine keeps the most recent
//! distinct queries around. The cache is a plain data structure with a
//! `get`/`put` interface and no global state.

use std::collections::HashMap;
use std::hash::Hash;

/// Most recent distinct query keys kept per engine.
pub const DEFAULT_QUERY_CACHE_CAPACITY: usize = 50;

#[derive(Debug)]
pub struct QueryCache<K, V> {
    entries: HashMap<K, (V, u64)>,
    counter: u64,
    capacity: usize,
}

impl<K: Eq + Hash + Clone, V> QueryCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            counter: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a cached value, refreshing its recency on a hit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.counter += 1;
        let counter = self.counter;
        self.entries.get_mut(key).map(|(value, stamp)| {
            *stamp = counter;
            &*value
        })
    }

    /// Insert a value, evicting the least recently used entry at capacity.
    pub fn put(&mut self, key: K, value: V) {
        self.counter += 1;
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            self.evict_lru();
        }
        self.entries.insert(key, (value, self.counter));
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, (_, stamp))| *stamp)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

impl<K: Eq + Hash + Clone, V> Default for QueryCache<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::QueryCache;

    #[test]
    fn get_returns_inserted_value() {
        let mut cache = QueryCache::new(2);
        cache.put("a", 1);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"b"), None);
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = QueryCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        // touch "a" so "b" becomes the eviction candidate
        cache.get(&"a");
        cache.put("c", 3);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"c"), Some(&3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn reinserting_an_existing_key_does_not_evict() {
        let mut cache = QueryCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("a", 10);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), Some(&10));
        assert_eq!(cache.get(&"b"), Some(&2));
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut cache = QueryCache::new(0);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"b"), Some(&2));
    }
}
