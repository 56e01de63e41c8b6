use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use dotenv::dotenv;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use segmentd::api::{self, AppState};
use segmentd::cache::SegmentCache;
use segmentd::segmenter::SegmentationService;
use segmentd::services::{ReclaimTrigger, ReclamationScheduler};
use segmentd::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "segmentd=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting segmentd...");

    let config = AppConfig::from_env();

    let segmentation = Arc::new(SegmentationService::new(SegmentCache::new(config.cache.clone())));

    info!("Loading segmentation model {}...", config.segmenter.active_model_name());
    let load_start = Instant::now();
    let model = config
        .segmenter
        .build()
        .context("Failed to load segmentation model")?;
    segmentation.load(model);
    info!("Model loaded successfully in {:.2}s", load_start.elapsed().as_secs_f64());

    let scheduler = Arc::new(ReclamationScheduler::new(
        config.scheduler.clone(),
        segmentation.clone(),
    ));

    // Initial cleanup after loading
    scheduler.reclaim(ReclaimTrigger::Manual);

    let timer = if config.scheduler.enabled {
        info!(
            "Reclamation enabled (every {} requests, every {}s)",
            config.scheduler.every_n_requests,
            config.scheduler.interval.as_secs()
        );
        Some(scheduler.clone().start())
    } else {
        info!("Reclamation timer disabled (set RECLAIM_SCHEDULER_ENABLED=true to enable)");
        None
    };

    let state = Arc::new(AppState::new(
        segmentation,
        scheduler,
        config.segmenter.model_info(),
    ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    let app = api::create_router(state.clone())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    info!("segmentd API server starting on http://{}", addr);
    api::print_routes();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.shutdown(timer).await;
    info!("segmentd shut down gracefully");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received...");
}
