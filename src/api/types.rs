//! API request/response types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::{CacheStats, Lookup};
use crate::segmenter::SegmentOptions;

// ============================================================================
// Root & Health
// ============================================================================

/// Service banner
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RootResponse {
    pub message: String,
    pub model: String,
    pub version: String,
    pub features: Vec<String>,
}

/// Health check response
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub request_count: u64,
}

// ============================================================================
// Segmentation
// ============================================================================

/// Request to segment one text
#[derive(Deserialize, Serialize, Debug)]
pub struct SegmentRequest {
    pub text: String,
    pub do_paragraph_segmentation: Option<bool>,
    pub threshold: Option<f64>,
}

impl SegmentRequest {
    pub fn options(&self) -> SegmentOptions {
        SegmentOptions::from_request(self.do_paragraph_segmentation, self.threshold)
    }
}

/// Request to segment several texts with shared options
#[derive(Deserialize, Serialize, Debug)]
pub struct BatchSegmentRequest {
    pub texts: Vec<String>,
    pub do_paragraph_segmentation: Option<bool>,
    pub threshold: Option<f64>,
}

impl BatchSegmentRequest {
    pub fn options(&self) -> SegmentOptions {
        SegmentOptions::from_request(self.do_paragraph_segmentation, self.threshold)
    }
}

/// Segmentation result for one text
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SegmentationResponse {
    pub sentences: Vec<String>,
    pub sentence_count: usize,
    /// Seconds spent serving this text
    pub processing_time: f64,
    pub cached: bool,
}

impl SegmentationResponse {
    pub fn from_lookup(lookup: Lookup, elapsed: Duration) -> Self {
        let cached = lookup.is_hit();
        let sentences = lookup.sentences.to_vec();
        Self {
            sentence_count: sentences.len(),
            sentences,
            processing_time: elapsed.as_secs_f64(),
            cached,
        }
    }
}

/// Batch segmentation result
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BatchSegmentationResponse {
    pub results: Vec<SegmentationResponse>,
    pub total_texts: usize,
    pub total_processing_time: f64,
}

// ============================================================================
// Cache
// ============================================================================

/// Counters reported after a clear
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ClearedCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Response from `/cache/clear`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ClearCacheResponse {
    pub message: String,
    pub cache_stats: ClearedCacheStats,
}

impl ClearCacheResponse {
    pub fn from_stats(stats: CacheStats) -> Self {
        Self {
            message: "Cache cleared successfully".to_string(),
            cache_stats: ClearedCacheStats {
                hits: stats.hits,
                misses: stats.misses,
                size: stats.size,
            },
        }
    }
}

/// Response from `/cache/stats`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CacheStatsResponse {
    pub cache_size: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_hit_rate: String,
    pub current_size: usize,
    pub max_size: usize,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            cache_size: stats.capacity,
            cache_hits: stats.hits,
            cache_misses: stats.misses,
            cache_hit_rate: stats.hit_rate_display(),
            current_size: stats.size,
            max_size: stats.capacity,
        }
    }
}

// ============================================================================
// Model Info
// ============================================================================

/// Cache and cleanup features, with live counters
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OptimizationFeatures {
    pub caching: bool,
    pub background_cleanup: bool,
    pub cache_size: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_hit_rate: String,
}

/// Response from `/model-info`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ModelInfoResponse {
    pub model_name: String,
    pub provider: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_languages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper: Option<String>,
    pub optimization_features: OptimizationFeatures,
}
