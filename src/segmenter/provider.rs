//! Segmentation provider trait for abstraction over different backends.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Options forwarded to the segmentation model
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentOptions {
    /// Boundary probability threshold; `None` lets the model decide
    pub threshold: Option<f64>,

    /// Group sentences by paragraph before returning them
    pub paragraph_segmentation: bool,
}

impl SegmentOptions {
    /// Builds options from optional request fields, filling in defaults
    pub fn from_request(paragraph_segmentation: Option<bool>, threshold: Option<f64>) -> Self {
        Self {
            threshold,
            paragraph_segmentation: paragraph_segmentation.unwrap_or(false),
        }
    }

    /// Sets the boundary threshold
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Enables or disables paragraph segmentation
    pub fn paragraphs(mut self, enabled: bool) -> Self {
        self.paragraph_segmentation = enabled;
        self
    }
}

/// Raw model output, before cleanup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSegmentation {
    /// One flat run of sentences
    Sentences(Vec<String>),

    /// Sentences grouped by paragraph
    Paragraphs(Vec<Vec<String>>),
}

impl RawSegmentation {
    /// Flattens paragraphs in order, trims every sentence and drops empty ones
    pub fn into_sentences(self) -> Vec<String> {
        let flat: Vec<String> = match self {
            RawSegmentation::Sentences(sentences) => sentences,
            RawSegmentation::Paragraphs(paragraphs) => paragraphs.into_iter().flatten().collect(),
        };

        flat.into_iter()
            .filter_map(|sentence| {
                let trimmed = sentence.trim();
                if trimmed.is_empty() {
                    None
                } else if trimmed.len() == sentence.len() {
                    Some(sentence)
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect()
    }
}

/// Trait for sentence segmentation backends
///
/// Implementations are loaded once at startup and shared for the lifetime
/// of the process.
#[async_trait]
pub trait SentenceSegmenter: Send + Sync {
    /// Splits `text` into sentences (or paragraphs of sentences)
    async fn split(&self, text: &str, options: &SegmentOptions) -> Result<RawSegmentation>;

    /// Name of the underlying model
    fn model_name(&self) -> &str;

    /// Returns the provider name for logging
    fn provider_name(&self) -> &str;

    /// Releases deferred resources held by the backend.
    ///
    /// Returns how many objects were freed.
    fn release_resources(&self) -> Result<usize> {
        Ok(0)
    }
}
