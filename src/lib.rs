//! segmentd: sentence segmentation over HTTP with a bounded result cache
//!
//! This module exposes the public API of the library.

pub mod api;
pub mod cache;
pub mod config;
pub mod segmenter;
pub mod services;

pub use config::AppConfig;

// Cache exports
pub use cache::{CacheConfig, CacheKey, CacheStats, Lookup, LookupOutcome, SegmentCache, ThreadSafeLruCache};

// Segmenter exports
pub use segmenter::{
    MockSegmenter, RawSegmentation, RemoteSegmenter, RuleBasedSegmenter, SegmentError, SegmentOptions,
    SegmentationService, SegmenterConfig, SentenceSegmenter,
};

// Service exports
pub use services::{ReclaimHook, ReclamationScheduler, SchedulerConfig, TimerState};
