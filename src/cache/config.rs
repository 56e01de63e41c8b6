//! Configuration for the cache module.

use serde::{Deserialize, Serialize};

/// Default number of segmentation results kept in memory
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Configuration for the LRU cache
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Creates a new cache configuration with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Loads configuration from environment variables
    pub fn from_env() -> Self {
        let capacity = std::env::var("CACHE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|capacity: &usize| *capacity > 0)
            .unwrap_or(DEFAULT_CACHE_CAPACITY);

        Self { capacity }
    }
}

/// Point-in-time cache statistics.
///
/// Every field is read under the same lock, so `hits`, `misses` and `size`
/// always describe the same instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of cache hits since creation or the last clear
    pub hits: u64,

    /// Number of cache misses since creation or the last clear
    pub misses: u64,

    /// Number of evictions due to capacity
    pub evictions: u64,

    /// Current number of entries
    pub size: usize,

    /// Maximum number of entries
    pub capacity: usize,
}

impl CacheStats {
    /// Calculates hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_lookups();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate_percent(&self) -> f64 {
        self.hit_rate() * 100.0
    }

    /// Hit rate formatted to one decimal, e.g. `"66.7%"`.
    ///
    /// Exact ties round to even (`6.25` shows as `6.2%`).
    pub fn hit_rate_display(&self) -> String {
        format!("{:.1}%", self.hit_rate_percent())
    }

    /// Returns total lookups (hits + misses)
    pub fn total_lookups(&self) -> u64 {
        self.hits + self.misses
    }
}
