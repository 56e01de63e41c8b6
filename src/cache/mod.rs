//! LRU result cache for segmentd.
//!
//! This module provides:
//! - A thread-safe LRU cache whose hit/miss counters share the map's lock
//! - Content fingerprints ([`CacheKey`]) over text and normalized options
//! - A memoizing [`SegmentCache`] used by the segmentation service
//!
//! # Example
//!
//! ```rust,ignore
//! use segmentd::cache::{CacheKey, SegmentCache};
//! use segmentd::segmenter::SegmentOptions;
//!
//! let cache = SegmentCache::with_capacity(100);
//! let options = SegmentOptions::default();
//! let key = CacheKey::new("Hello. World.", &options);
//!
//! let lookup = cache
//!     .get_or_compute(key, || async { Ok(vec!["Hello.".into(), "World.".into()]) })
//!     .await?;
//! assert!(!lookup.is_hit());
//! ```

pub mod config;
pub mod key;
pub mod lru_cache;
pub mod segment_cache;

// Re-exports
pub use config::{CacheConfig, CacheStats, DEFAULT_CACHE_CAPACITY};
pub use key::CacheKey;
pub use lru_cache::ThreadSafeLruCache;
pub use segment_cache::{Lookup, LookupOutcome, SegmentCache, Sentences};
