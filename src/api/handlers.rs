//! API request handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, Json};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::segmenter::{ModelInfo, SegmentError, SegmentOptions, SegmentationService};
use crate::services::ReclamationScheduler;

use super::error::{ApiError, ApiResult};
use super::types::*;

/// Application state shared across handlers
pub struct AppState {
    /// Model slot and result cache
    pub segmentation: Arc<SegmentationService>,

    /// Request counter and reclamation triggers
    pub scheduler: Arc<ReclamationScheduler>,

    /// Static model metadata
    pub model_info: ModelInfo,
}

/// Thread-safe shared state
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        segmentation: Arc<SegmentationService>,
        scheduler: Arc<ReclamationScheduler>,
        model_info: ModelInfo,
    ) -> Self {
        Self {
            segmentation,
            scheduler,
            model_info,
        }
    }

    /// Stops the reclamation timer, waits for it, then releases the model
    pub async fn shutdown(&self, timer: Option<JoinHandle<()>>) {
        self.scheduler.cancel();
        if let Some(handle) = timer {
            if let Err(e) = handle.await {
                warn!("Reclamation timer did not stop cleanly: {}", e);
            }
        }
        self.segmentation.release();
    }
}

/// Rejects thresholds outside `[0, 1]`
fn validate_options(options: &SegmentOptions) -> ApiResult<()> {
    match options.threshold {
        Some(threshold) if !(0.0..=1.0).contains(&threshold) => Err(ApiError::BadRequest(format!(
            "threshold must be between 0 and 1, got {}",
            threshold
        ))),
        _ => Ok(()),
    }
}

fn log_segment_error(context: &str, err: &SegmentError) {
    match err {
        SegmentError::ModelUnavailable => warn!("{}: {}", context, err),
        SegmentError::SegmentationFailure(_) => error!("{}: {}", context, err),
    }
}

// ============================================================================
// Root & Health
// ============================================================================

/// Service banner
pub async fn root(State(state): State<SharedState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Segment Any Text API".to_string(),
        model: state.model_info.model_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: vec!["caching".to_string(), "auto_cleanup".to_string()],
    })
}

/// Health check endpoint
pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.segmentation.is_loaded(),
        request_count: state.scheduler.request_count(),
    })
}

// ============================================================================
// Segmentation Handlers
// ============================================================================

/// Segment a single text
pub async fn segment(
    State(state): State<SharedState>,
    Json(request): Json<SegmentRequest>,
) -> ApiResult<Json<SegmentationResponse>> {
    let start = Instant::now();
    let options = request.options();
    validate_options(&options)?;

    let lookup = state
        .segmentation
        .segment(&request.text, &options)
        .await
        .map_err(|e| {
            log_segment_error("Error in segmentation", &e);
            ApiError::from(e)
        })?;

    let response = SegmentationResponse::from_lookup(lookup, start.elapsed());
    debug!(
        "Segmented {} sentences in {:.3}s (cached: {})",
        response.sentence_count, response.processing_time, response.cached
    );

    Ok(Json(response))
}

/// Segment several texts with shared options. The first failure fails the batch.
pub async fn segment_batch(
    State(state): State<SharedState>,
    Json(request): Json<BatchSegmentRequest>,
) -> ApiResult<Json<BatchSegmentationResponse>> {
    let start = Instant::now();
    let options = request.options();
    validate_options(&options)?;

    state.segmentation.ensure_loaded().map_err(|e| {
        log_segment_error("Error in batch segmentation", &e);
        ApiError::from(e)
    })?;

    let mut results = Vec::with_capacity(request.texts.len());
    for text in &request.texts {
        let text_start = Instant::now();

        let lookup = state.segmentation.segment(text, &options).await.map_err(|e| {
            log_segment_error("Error in batch segmentation", &e);
            ApiError::from(e)
        })?;

        results.push(SegmentationResponse::from_lookup(lookup, text_start.elapsed()));
    }

    let total_processing_time = start.elapsed().as_secs_f64();
    info!(
        "Segmented batch of {} texts in {:.3}s",
        results.len(),
        total_processing_time
    );

    Ok(Json(BatchSegmentationResponse {
        total_texts: results.len(),
        results,
        total_processing_time,
    }))
}

// ============================================================================
// Cache Handlers
// ============================================================================

/// Clear the segmentation cache
pub async fn clear_cache(State(state): State<SharedState>) -> Json<ClearCacheResponse> {
    let stats = state.segmentation.clear_cache();
    Json(ClearCacheResponse::from_stats(stats))
}

/// Get cache statistics
pub async fn cache_stats(State(state): State<SharedState>) -> Json<CacheStatsResponse> {
    Json(state.segmentation.cache_stats().into())
}

// ============================================================================
// Model Info Handler
// ============================================================================

/// Static model metadata plus live cache statistics
pub async fn model_info(State(state): State<SharedState>) -> ApiResult<Json<ModelInfoResponse>> {
    let model = state.segmentation.model()?;
    let stats = state.segmentation.cache_stats();
    let info = &state.model_info;

    Ok(Json(ModelInfoResponse {
        model_name: model.model_name().to_string(),
        provider: model.provider_name().to_string(),
        description: info.description.clone(),
        supported_languages: info.supported_languages,
        paper: info.paper.clone(),
        optimization_features: OptimizationFeatures {
            caching: true,
            background_cleanup: state.scheduler.config().enabled,
            cache_size: stats.capacity,
            cache_hits: stats.hits,
            cache_misses: stats.misses,
            cache_hit_rate: stats.hit_rate_display(),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_options() {
        assert!(validate_options(&SegmentOptions::default()).is_ok());
        assert!(validate_options(&SegmentOptions::default().threshold(0.5)).is_ok());
        assert!(validate_options(&SegmentOptions::default().threshold(1.0)).is_ok());

        let err = validate_options(&SegmentOptions::default().threshold(1.5)).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(validate_options(&SegmentOptions::default().threshold(-0.1)).is_err());
    }
}
