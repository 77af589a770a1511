//! Bounded cache of filtered synonym lists.
//!
//! When full, the entry with the lowest weight is evicted to make room. The
//! weight of an entry is supplied by the owner at insertion time, which lets
//! the thesaurus rank entries by the usage counters it keeps in its index.
//! This is a least-valuable policy rather than LRU: a fresh entry nobody has
//! used yet can be evicted before an old, popular one.
use hashbrown::HashMap;
use smol_str::SmolStr;

/// Capacity used when none is configured.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Map from normalized word to a cached value, bounded by `capacity`.
#[derive(Debug, Clone)]
pub struct SuggestionCache<V> {
    capacity: usize,
    entries: HashMap<SmolStr, V>,
}

impl<V> SuggestionCache<V> {
    /// An empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> SuggestionCache<V> {
        SuggestionCache {
            capacity,
            entries: HashMap::new(),
        }
    }

    /// maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` has an entry.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// cached value for `key`
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Stores `value` under `key`, evicting the lowest-weighted entry first
    /// when the cache is full and `key` is new. Ties are broken by key so
    /// eviction is deterministic.
    ///
    /// Returns the evicted key, if any. A zero-capacity cache stores nothing.
    pub fn insert<F>(&mut self, key: SmolStr, value: V, weight: F) -> Option<SmolStr>
    where
        F: Fn(&SmolStr, &V) -> u64,
    {
        if self.capacity == 0 {
            return None;
        }

        let mut evicted = None;

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            let victim = self
                .entries
                .iter()
                .map(|(k, v)| (weight(k, v), k))
                .min()
                .map(|(_, k)| k.clone());

            if let Some(victim) = victim {
                log::trace!("Evicting '{}' from suggestion cache", victim);
                self.entries.remove(&victim);
                evicted = Some(victim);
            }
        }

        self.entries.insert(key, value);
        evicted
    }

    /// Drops the entry for `key`; returns whether one was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
