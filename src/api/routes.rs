//! API route definitions.

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tracing::debug;

use super::handlers::{self, SharedState};

/// Creates the API router with all routes configured
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // Banner and health check
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        // Model metadata
        .route("/model-info", get(handlers::model_info))
        // Cache management
        .route("/cache/clear", post(handlers::clear_cache))
        .route("/cache/stats", get(handlers::cache_stats))
        // Segmentation (counted towards reclamation)
        .merge(segmentation_routes(state.clone()))
        .with_state(state)
}

/// Segmentation routes, wrapped in post-request bookkeeping
fn segmentation_routes(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/segment", post(handlers::segment))
        .route("/segment-batch", post(handlers::segment_batch))
        .route_layer(middleware::from_fn_with_state(state, request_bookkeeping))
}

/// Counts every completed segmentation request, successful or not.
///
/// The count (and any reclamation it triggers) runs on a separate task so
/// the response is returned without waiting for it.
async fn request_bookkeeping(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let scheduler = state.scheduler.clone();
    tokio::spawn(async move {
        if let Some(outcome) = scheduler.record_request() {
            debug!("Post-request cleanup reclaimed {} objects", outcome.reclaimed);
        }
    });

    response
}

/// Prints all available routes for logging
pub fn print_routes() {
    tracing::info!("Available API routes:");
    tracing::info!("  GET  /               - Service banner");
    tracing::info!("  GET  /health         - Health check with model status");
    tracing::info!("  POST /segment        - Split one text into sentences");
    tracing::info!("  POST /segment-batch  - Split several texts into sentences");
    tracing::info!("  POST /cache/clear    - Clear the segmentation cache");
    tracing::info!("  GET  /cache/stats    - Cache hit/miss statistics");
    tracing::info!("  GET  /model-info     - Model metadata and cache statistics");
}
