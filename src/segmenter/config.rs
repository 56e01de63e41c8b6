//! Configuration for the segmentation backend.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::provider::SentenceSegmenter;
use super::remote::RemoteSegmenter;
use super::rule_based::RuleBasedSegmenter;

/// Name reported by the built-in splitter, whatever `SEGMENTER_MODEL` says
pub const RULE_BASED_MODEL_NAME: &str = "rule-based";

/// Which backend performs segmentation
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SegmenterBackend {
    /// Built-in punctuation splitter
    #[default]
    RuleBased,
    /// Model served over HTTP
    Remote,
}

/// Configuration for the segmentation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Backend to load at startup
    pub backend: SegmenterBackend,

    /// Model requested from the remote backend
    pub model_name: String,

    /// Base URL of the remote model server
    pub base_url: String,

    /// Request timeout for the remote backend
    pub timeout: Duration,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            backend: SegmenterBackend::default(),
            model_name: "sat-3l-sm".to_string(),
            base_url: "http://localhost:9000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl SegmenterConfig {
    /// Loads configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let backend = std::env::var("SEGMENTER_BACKEND")
            .map(|b| match b.to_lowercase().as_str() {
                "remote" | "http" => SegmenterBackend::Remote,
                _ => SegmenterBackend::RuleBased,
            })
            .unwrap_or_default();

        let model_name = std::env::var("SEGMENTER_MODEL").unwrap_or(defaults.model_name);
        let base_url = std::env::var("SEGMENTER_URL").unwrap_or(defaults.base_url);

        let timeout = std::env::var("SEGMENTER_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            backend,
            model_name,
            base_url,
            timeout,
        }
    }

    /// Name of the model that will actually serve requests
    pub fn active_model_name(&self) -> &str {
        match self.backend {
            SegmenterBackend::RuleBased => RULE_BASED_MODEL_NAME,
            SegmenterBackend::Remote => &self.model_name,
        }
    }

    /// Instantiates the configured backend
    pub fn build(&self) -> Result<Arc<dyn SentenceSegmenter>> {
        match self.backend {
            SegmenterBackend::RuleBased => Ok(Arc::new(RuleBasedSegmenter::new(self.active_model_name()))),
            SegmenterBackend::Remote => {
                let segmenter = RemoteSegmenter::new(&self.base_url, &self.model_name, self.timeout)
                    .with_context(|| format!("Failed to initialize remote segmenter at {}", self.base_url))?;
                Ok(Arc::new(segmenter))
            }
        }
    }

    /// Static metadata describing the configured model
    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            model_name: self.active_model_name().to_string(),
            description: match self.backend {
                SegmenterBackend::RuleBased => "Rule-based punctuation sentence splitter".to_string(),
                SegmenterBackend::Remote => "3-layer Segment Any Text model".to_string(),
            },
            supported_languages: match self.backend {
                SegmenterBackend::RuleBased => None,
                SegmenterBackend::Remote => Some(85),
            },
            paper: match self.backend {
                SegmenterBackend::RuleBased => None,
                SegmenterBackend::Remote => Some("https://arxiv.org/abs/2406.16678".to_string()),
            },
        }
    }
}

/// Descriptive metadata returned by `/model-info`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelInfo {
    pub model_name: String,
    pub description: String,
    pub supported_languages: Option<u32>,
    pub paper: Option<String>,
}
