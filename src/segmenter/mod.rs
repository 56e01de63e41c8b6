//! Sentence segmentation module for segmentd.
//!
//! This module wraps an externally supplied segmentation model:
//! - Rule-based splitter (built in, default)
//! - Remote model server over HTTP
//! - Mock provider (for testing)
//!
//! # Example
//!
//! ```rust,ignore
//! use segmentd::cache::SegmentCache;
//! use segmentd::segmenter::{SegmentOptions, SegmentationService, SegmenterConfig};
//!
//! let model = SegmenterConfig::default().build()?;
//! let service = SegmentationService::with_model(model, SegmentCache::with_capacity(100));
//!
//! let lookup = service.segment("Hello world. Bye.", &SegmentOptions::default()).await?;
//! println!("{} sentences (cached: {})", lookup.sentences.len(), lookup.is_hit());
//! ```

pub mod config;
pub mod error;
pub mod mock_provider;
pub mod provider;
pub mod remote;
pub mod rule_based;
pub mod service;

// Re-exports
pub use config::{ModelInfo, SegmenterBackend, SegmenterConfig};
pub use error::SegmentError;
pub use mock_provider::MockSegmenter;
pub use provider::{RawSegmentation, SegmentOptions, SentenceSegmenter};
pub use remote::RemoteSegmenter;
pub use rule_based::RuleBasedSegmenter;
pub use service::SegmentationService;
