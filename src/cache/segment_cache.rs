//! Memoizing cache for segmentation results.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info};

use super::config::{CacheConfig, CacheStats};
use super::key::CacheKey;
use super::lru_cache::ThreadSafeLruCache;
use crate::segmenter::SegmentError;

/// Sentences stored for one cache key
pub type Sentences = Arc<[String]>;

/// How a lookup was served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Served from the cache, no segmentation performed
    Hit,
    /// Computed and stored
    Miss,
}

/// Result of [`SegmentCache::get_or_compute`]
#[derive(Debug, Clone)]
pub struct Lookup {
    pub sentences: Sentences,
    pub outcome: LookupOutcome,
}

impl Lookup {
    pub fn is_hit(&self) -> bool {
        self.outcome == LookupOutcome::Hit
    }
}

/// Bounded cache of post-processed segmentation results
///
/// Keyed by [`CacheKey`]; evicts the least recently used result when full.
/// Concurrent misses on the same key may both compute; the later insert
/// simply replaces the earlier one.
pub struct SegmentCache {
    cache: ThreadSafeLruCache<CacheKey, Sentences>,
}

impl SegmentCache {
    /// Creates a new segment cache with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        info!("Initializing SegmentCache with capacity: {}", config.capacity);
        Self {
            cache: ThreadSafeLruCache::new(config),
        }
    }

    /// Creates a new segment cache with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(CacheConfig::with_capacity(capacity))
    }

    /// Returns the cached sentences for `key`, or runs `compute` and stores
    /// its result.
    ///
    /// `compute` runs without holding the cache lock. A failed computation
    /// is returned as-is and nothing is stored.
    pub async fn get_or_compute<F, Fut>(&self, key: CacheKey, compute: F) -> Result<Lookup, SegmentError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>, SegmentError>>,
    {
        if let Some(sentences) = self.cache.get(&key) {
            debug!("Segment cache hit for {:?}", key);
            return Ok(Lookup {
                sentences,
                outcome: LookupOutcome::Hit,
            });
        }

        debug!("Segment cache miss for {:?}", key);
        let sentences: Sentences = compute().await?.into();
        self.cache.put(key, Arc::clone(&sentences));

        Ok(Lookup {
            sentences,
            outcome: LookupOutcome::Miss,
        })
    }

    /// Checks if a result is cached (without affecting LRU order)
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.cache.contains(key)
    }

    /// Reads a cached result without counting a lookup
    pub fn peek(&self, key: &CacheKey) -> Option<Sentences> {
        self.cache.peek(key)
    }

    /// Returns current cache size
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Checks if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Drops every entry and zeroes the counters, returning the post-clear snapshot
    pub fn clear(&self) -> CacheStats {
        info!("Clearing segment cache");
        self.cache.clear()
    }

    /// Returns a consistent statistics snapshot
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
