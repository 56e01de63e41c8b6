//! Segmentation service: model slot plus result cache.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info};

use super::error::SegmentError;
use super::provider::{SegmentOptions, SentenceSegmenter};
use crate::cache::{CacheKey, CacheStats, Lookup, SegmentCache};
use crate::services::ReclaimHook;

/// Main segmentation service
///
/// Holds the loaded model (if any) and the memoizing cache in front of it.
pub struct SegmentationService {
    model: RwLock<Option<Arc<dyn SentenceSegmenter>>>,
    cache: SegmentCache,
}

impl SegmentationService {
    /// Creates a service with an empty model slot
    pub fn new(cache: SegmentCache) -> Self {
        Self {
            model: RwLock::new(None),
            cache,
        }
    }

    /// Creates a service with `model` already loaded
    pub fn with_model(model: Arc<dyn SentenceSegmenter>, cache: SegmentCache) -> Self {
        let service = Self::new(cache);
        service.load(model);
        service
    }

    /// Installs the model, replacing any previous one
    pub fn load(&self, model: Arc<dyn SentenceSegmenter>) {
        info!(
            "Segmentation model loaded: {} (provider: {})",
            model.model_name(),
            model.provider_name()
        );
        *self.model.write().unwrap_or_else(PoisonError::into_inner) = Some(model);
    }

    /// Drops the model. Returns whether one was loaded.
    pub fn release(&self) -> bool {
        let released = self
            .model
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some();
        if released {
            info!("Model resources cleaned up");
        }
        released
    }

    /// Whether a model is currently loaded
    pub fn is_loaded(&self) -> bool {
        self.model.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Returns the loaded model or [`SegmentError::ModelUnavailable`]
    pub fn model(&self) -> Result<Arc<dyn SentenceSegmenter>, SegmentError> {
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(SegmentError::ModelUnavailable)
    }

    pub fn ensure_loaded(&self) -> Result<(), SegmentError> {
        self.model().map(|_| ())
    }

    /// Segments `text`, serving repeated requests from the cache.
    ///
    /// Fails with [`SegmentError::ModelUnavailable`] when no model is loaded,
    /// even if the result is cached.
    pub async fn segment(&self, text: &str, options: &SegmentOptions) -> Result<Lookup, SegmentError> {
        let model = self.model()?;
        let key = CacheKey::new(text, options);

        debug!("Segmenting text ({} bytes)", text.len());

        self.cache
            .get_or_compute(key, || async move {
                let raw = model.split(text, options).await.map_err(SegmentError::failure)?;
                Ok(raw.into_sentences())
            })
            .await
    }

    /// The result cache
    pub fn cache(&self) -> &SegmentCache {
        &self.cache
    }

    /// Cache statistics snapshot
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Empties the cache and returns the post-clear statistics
    pub fn clear_cache(&self) -> CacheStats {
        self.cache.clear()
    }
}

impl ReclaimHook for SegmentationService {
    fn reclaim(&self) -> anyhow::Result<usize> {
        match self.model() {
            Ok(model) => model.release_resources(),
            Err(_) => Ok(0),
        }
    }
}
