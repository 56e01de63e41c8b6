use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{self, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use segmentd::api::{
    create_router, AppState, BatchSegmentationResponse, CacheStatsResponse, ClearCacheResponse,
    ErrorResponse, HealthResponse, ModelInfoResponse, SegmentationResponse,
};
use segmentd::cache::SegmentCache;
use segmentd::segmenter::{MockSegmenter, RawSegmentation, SegmentationService, SegmenterConfig};
use segmentd::services::{ReclamationScheduler, SchedulerConfig};

struct TestApp {
    router: Router,
    state: Arc<AppState>,
    mock: Arc<MockSegmenter>,
}

fn test_app_with(mock: MockSegmenter, capacity: usize, loaded: bool) -> TestApp {
    let mock = Arc::new(mock);
    let segmentation = Arc::new(SegmentationService::new(SegmentCache::with_capacity(capacity)));
    if loaded {
        segmentation.load(mock.clone());
    }

    let scheduler_config = SchedulerConfig {
        every_n_requests: 3,
        interval: Duration::from_secs(60),
        enabled: false,
    };
    let scheduler = Arc::new(ReclamationScheduler::new(scheduler_config, segmentation.clone()));

    let state = Arc::new(AppState::new(
        segmentation,
        scheduler,
        SegmenterConfig::default().model_info(),
    ));

    TestApp {
        router: create_router(state.clone()),
        state,
        mock,
    }
}

fn test_app() -> TestApp {
    test_app_with(MockSegmenter::new(), 100, true)
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.expect("router oneshot failed");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, bytes.to_vec())
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap_or_else(|e| {
        panic!("unexpected body {:?}: {}", String::from_utf8_lossy(bytes), e)
    })
}

async fn wait_for_request_count(state: &AppState, expected: u64) {
    for _ in 0..100 {
        if state.scheduler.request_count() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "request count stuck at {} (expected {})",
        state.scheduler.request_count(),
        expected
    );
}

#[tokio::test]
async fn test_segment_miss_then_hit() {
    let app = test_app();
    let body = json!({ "text": "Hello world. How are you?" });

    let (status, bytes) = send(&app.router, "POST", "/segment", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let first: SegmentationResponse = parse(&bytes);
    assert_eq!(first.sentences, vec!["Hello world.", "How are you?"]);
    assert_eq!(first.sentence_count, 2);
    assert!(!first.cached);

    let (status, bytes) = send(&app.router, "POST", "/segment", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    let second: SegmentationResponse = parse(&bytes);
    assert!(second.cached);
    assert_eq!(second.sentences, first.sentences);

    assert_eq!(app.mock.split_calls(), 1);
}

#[tokio::test]
async fn test_explicit_default_options_share_cache_entry() {
    let app = test_app();

    send(&app.router, "POST", "/segment", Some(json!({ "text": "One. Two." }))).await;
    let (_, bytes) = send(
        &app.router,
        "POST",
        "/segment",
        Some(json!({ "text": "One. Two.", "do_paragraph_segmentation": false })),
    )
    .await;

    let response: SegmentationResponse = parse(&bytes);
    assert!(response.cached);
    assert_eq!(app.mock.split_calls(), 1);
}

#[tokio::test]
async fn test_whitespace_only_text_yields_no_sentences() {
    let app = test_app();

    let (status, bytes) = send(&app.router, "POST", "/segment", Some(json!({ "text": "   \n\t " }))).await;
    assert_eq!(status, StatusCode::OK);

    let response: SegmentationResponse = parse(&bytes);
    assert_eq!(response.sentence_count, 0);
    assert!(response.sentences.is_empty());
}

#[tokio::test]
async fn test_paragraph_mode_is_flattened() {
    let script = RawSegmentation::Paragraphs(vec![
        vec!["a.".to_string(), "b.".to_string()],
        vec!["c.".to_string()],
    ]);
    let app = test_app_with(MockSegmenter::new().with_script(script), 100, true);

    let (status, bytes) = send(
        &app.router,
        "POST",
        "/segment",
        Some(json!({ "text": "a. b.\n\nc.", "do_paragraph_segmentation": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let response: SegmentationResponse = parse(&bytes);
    assert_eq!(response.sentences, vec!["a.", "b.", "c."]);
    assert_eq!(response.sentence_count, 3);
}

#[tokio::test]
async fn test_model_not_loaded_returns_503() {
    let app = test_app_with(MockSegmenter::new(), 100, false);

    let (status, bytes) = send(&app.router, "POST", "/segment", Some(json!({ "text": "Hi." }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let error: ErrorResponse = parse(&bytes);
    assert!(!error.success);
    assert_eq!(error.code, "SERVICE_UNAVAILABLE");
    assert!(error.error.contains("Model not loaded"));

    let (status, _) = send(&app.router, "POST", "/segment-batch", Some(json!({ "texts": [] }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = send(&app.router, "GET", "/model-info", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (_, bytes) = send(&app.router, "GET", "/health", None).await;
    let health: HealthResponse = parse(&bytes);
    assert_eq!(health.status, "healthy");
    assert!(!health.model_loaded);
}

#[tokio::test]
async fn test_segmentation_failure_returns_500() {
    let app = test_app_with(MockSegmenter::new().should_fail(true), 100, true);

    let (status, bytes) = send(&app.router, "POST", "/segment", Some(json!({ "text": "Hi." }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = parse(&bytes);
    assert_eq!(error.code, "INTERNAL_ERROR");
    assert!(error.error.contains("configured to fail"));

    // Failed requests still count towards reclamation
    wait_for_request_count(&app.state, 1).await;
}

#[tokio::test]
async fn test_invalid_threshold_returns_400() {
    let app = test_app();

    let (status, _) = send(
        &app.router,
        "POST",
        "/segment",
        Some(json!({ "text": "Hi.", "threshold": 2.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.mock.split_calls(), 0);
}

#[tokio::test]
async fn test_batch_segmentation() {
    let app = test_app();

    let (status, bytes) = send(
        &app.router,
        "POST",
        "/segment-batch",
        Some(json!({ "texts": ["One. Two.", "Three.", "One. Two."] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let response: BatchSegmentationResponse = parse(&bytes);
    assert_eq!(response.total_texts, 3);
    assert_eq!(response.results[0].sentence_count, 2);
    assert_eq!(response.results[1].sentences, vec!["Three."]);
    assert!(!response.results[0].cached);
    assert!(response.results[2].cached);
    assert!(response.total_processing_time >= 0.0);

    assert_eq!(app.mock.split_calls(), 2);
}

#[tokio::test]
async fn test_cache_stats_and_clear() {
    let app = test_app_with(MockSegmenter::new(), 2, true);

    let (_, bytes) = send(&app.router, "GET", "/cache/stats", None).await;
    let stats: CacheStatsResponse = parse(&bytes);
    assert_eq!(stats.cache_hit_rate, "0.0%");
    assert_eq!(stats.max_size, 2);

    for text in ["a.", "a.", "a.", "b.", "c."] {
        send(&app.router, "POST", "/segment", Some(json!({ "text": text }))).await;
    }

    let (_, bytes) = send(&app.router, "GET", "/cache/stats", None).await;
    let stats: CacheStatsResponse = parse(&bytes);
    assert_eq!(stats.cache_hits, 2);
    assert_eq!(stats.cache_misses, 3);
    assert_eq!(stats.cache_hit_rate, "40.0%");
    assert_eq!(stats.current_size, 2);

    let (status, bytes) = send(&app.router, "POST", "/cache/clear", None).await;
    assert_eq!(status, StatusCode::OK);
    let cleared: ClearCacheResponse = parse(&bytes);
    assert_eq!(cleared.message, "Cache cleared successfully");
    assert_eq!(
        (cleared.cache_stats.hits, cleared.cache_stats.misses, cleared.cache_stats.size),
        (0, 0, 0)
    );

    let (_, bytes) = send(&app.router, "GET", "/cache/stats", None).await;
    let stats: CacheStatsResponse = parse(&bytes);
    assert_eq!((stats.cache_hits, stats.cache_misses, stats.current_size), (0, 0, 0));
}

#[tokio::test]
async fn test_model_info_reports_live_stats() {
    let app = test_app();

    send(&app.router, "POST", "/segment", Some(json!({ "text": "x." }))).await;
    send(&app.router, "POST", "/segment", Some(json!({ "text": "x." }))).await;

    let (status, bytes) = send(&app.router, "GET", "/model-info", None).await;
    assert_eq!(status, StatusCode::OK);

    let info: ModelInfoResponse = parse(&bytes);
    assert_eq!(info.model_name, "mock");
    assert_eq!(info.optimization_features.cache_size, 100);
    assert_eq!(info.optimization_features.cache_hits, 1);
    assert_eq!(info.optimization_features.cache_misses, 1);
    assert_eq!(info.optimization_features.cache_hit_rate, "50.0%");
}

#[tokio::test]
async fn test_request_counter_triggers_reclaim() {
    let app = test_app_with(MockSegmenter::new().with_reclaim_yield(4), 100, true);

    for i in 0..7 {
        send(&app.router, "POST", "/segment", Some(json!({ "text": format!("text {}.", i) }))).await;
    }
    // Non-segmentation routes are not counted
    send(&app.router, "GET", "/cache/stats", None).await;

    wait_for_request_count(&app.state, 7).await;
    assert_eq!(app.state.scheduler.request_count(), 7);

    // every_n_requests = 3 → passes after requests 3 and 6
    assert_eq!(app.state.scheduler.reclaim_count(), 2);
    assert_eq!(app.mock.reclaim_calls(), 2);

    let (_, bytes) = send(&app.router, "GET", "/health", None).await;
    let health: HealthResponse = parse(&bytes);
    assert!(health.model_loaded);
    assert_eq!(health.request_count, 7);
}

#[tokio::test]
async fn test_root_banner() {
    let app = test_app();

    let (status, bytes) = send(&app.router, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);

    let banner: Value = parse(&bytes);
    assert_eq!(banner["model"], "rule-based");
    assert_eq!(banner["features"], json!(["caching", "auto_cleanup"]));
}
