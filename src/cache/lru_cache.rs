//! Thread-safe LRU cache implementation.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;

use super::config::{CacheConfig, CacheStats};

/// Map and counters live behind one lock so a reader never sees them disagree.
struct Inner<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// Thread-safe LRU cache with hit/miss accounting
pub struct ThreadSafeLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    inner: Mutex<Inner<K, V>>,

    /// Cache configuration
    config: CacheConfig,
}

impl<K, V> ThreadSafeLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a new cache with the given configuration.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.capacity).unwrap_or(NonZeroUsize::MIN);
        let config = CacheConfig::with_capacity(capacity.get());
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
            config,
        }
    }

    /// Creates a new cache with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(CacheConfig::with_capacity(capacity))
    }

    fn lock(&self) -> MutexGuard<'_, Inner<K, V>> {
        // Counters and the map are updated together, so a poisoned guard is still coherent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Gets a value from the cache, promoting it to most recently used.
    ///
    /// Counts a hit or a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.lock();
        let found = inner.entries.get(key).cloned();
        match found {
            Some(value) => {
                inner.hits += 1;
                Some(value)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Reads a value without touching LRU order or counters
    pub fn peek(&self, key: &K) -> Option<V> {
        self.lock().entries.peek(key).cloned()
    }

    /// Puts a value into the cache
    ///
    /// Returns the previous value if the key was already present. Inserting a
    /// new key into a full cache evicts the least recently used entry.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        let mut inner = self.lock();
        match inner.entries.push(key.clone(), value) {
            Some((old_key, old_value)) if old_key == key => Some(old_value),
            Some(_) => {
                inner.evictions += 1;
                None
            }
            None => None,
        }
    }

    /// Checks if a key exists in the cache (without affecting LRU order)
    pub fn contains(&self, key: &K) -> bool {
        self.lock().entries.contains(key)
    }

    /// Returns the current number of entries
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Checks if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the capacity of the cache
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Clears all entries and resets every counter in one step.
    ///
    /// Returns the statistics as they stand right after the clear, taken
    /// before any other lookup can run.
    pub fn clear(&self) -> CacheStats {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.hits = 0;
        inner.misses = 0;
        inner.evictions = 0;
        self.snapshot(&inner)
    }

    /// Returns a consistent snapshot of the cache counters
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        self.snapshot(&inner)
    }

    fn snapshot(&self, inner: &Inner<K, V>) -> CacheStats {
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
            size: inner.entries.len(),
            capacity: self.config.capacity,
        }
    }
}
