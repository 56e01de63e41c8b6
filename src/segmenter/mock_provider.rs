//! Mock segmentation provider for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use super::provider::{RawSegmentation, SegmentOptions, SentenceSegmenter};
use super::rule_based::RuleBasedSegmenter;

/// Mock segmentation provider for testing
///
/// Splits with the rule-based splitter unless a scripted output is set, and
/// counts how often it is called.
pub struct MockSegmenter {
    latency_ms: u64,
    should_fail: bool,
    fail_reclaim: bool,
    reclaim_yield: usize,
    script: Mutex<Option<RawSegmentation>>,
    split_calls: AtomicUsize,
    reclaim_calls: AtomicUsize,
}

impl MockSegmenter {
    /// Creates a new mock provider
    pub fn new() -> Self {
        Self {
            latency_ms: 0,
            should_fail: false,
            fail_reclaim: false,
            reclaim_yield: 0,
            script: Mutex::new(None),
            split_calls: AtomicUsize::new(0),
            reclaim_calls: AtomicUsize::new(0),
        }
    }

    /// Sets the simulated latency
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Makes every split fail
    pub fn should_fail(mut self, fail: bool) -> Self {
        self.should_fail = fail;
        self
    }

    /// Makes every resource release fail
    pub fn fail_reclaim(mut self, fail: bool) -> Self {
        self.fail_reclaim = fail;
        self
    }

    /// Number of objects reported by each successful resource release
    pub fn with_reclaim_yield(mut self, objects: usize) -> Self {
        self.reclaim_yield = objects;
        self
    }

    /// Returns `output` from every split instead of splitting the text
    pub fn with_script(self, output: RawSegmentation) -> Self {
        self.set_script(Some(output));
        self
    }

    pub fn set_script(&self, output: Option<RawSegmentation>) {
        let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
        *script = output;
    }

    /// How many times `split` has been called
    pub fn split_calls(&self) -> usize {
        self.split_calls.load(Ordering::SeqCst)
    }

    /// How many times `release_resources` has been called
    pub fn reclaim_calls(&self) -> usize {
        self.reclaim_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentenceSegmenter for MockSegmenter {
    async fn split(&self, text: &str, options: &SegmentOptions) -> Result<RawSegmentation> {
        self.split_calls.fetch_add(1, Ordering::SeqCst);

        if self.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.latency_ms)).await;
        }

        if self.should_fail {
            anyhow::bail!("Mock segmenter configured to fail");
        }

        let scripted = self.script.lock().unwrap_or_else(|e| e.into_inner()).clone();
        if let Some(output) = scripted {
            return Ok(output);
        }

        if options.paragraph_segmentation {
            Ok(RawSegmentation::Paragraphs(RuleBasedSegmenter::split_paragraphs(text)))
        } else {
            Ok(RawSegmentation::Sentences(RuleBasedSegmenter::split_sentences(text)))
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn release_resources(&self) -> Result<usize> {
        self.reclaim_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_reclaim {
            anyhow::bail!("Mock segmenter failed to release resources");
        }

        Ok(self.reclaim_yield)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let mock = MockSegmenter::new();
        let options = SegmentOptions::default();

        mock.split("One. Two.", &options).await.unwrap();
        mock.split("Three.", &options).await.unwrap();

        assert_eq!(mock.split_calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let mock = MockSegmenter::new().should_fail(true);
        let result = mock.split("text", &SegmentOptions::default()).await;

        assert!(result.is_err());
        assert_eq!(mock.split_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_script() {
        let script = RawSegmentation::Paragraphs(vec![vec!["a.".to_string()]]);
        let mock = MockSegmenter::new().with_script(script.clone());

        let output = mock.split("ignored", &SegmentOptions::default()).await.unwrap();
        assert_eq!(output, script);
    }

    #[test]
    fn test_mock_release_resources() {
        let mock = MockSegmenter::new().with_reclaim_yield(7);
        assert_eq!(mock.release_resources().unwrap(), 7);

        let failing = MockSegmenter::new().fail_reclaim(true);
        assert!(failing.release_resources().is_err());
        assert_eq!(failing.reclaim_calls(), 1);
    }
}
