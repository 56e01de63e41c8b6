//! API module for segmentd.
//!
//! This module provides the HTTP REST API built with Axum:
//! - `/` - Service banner
//! - `/health` - Health check endpoint
//! - `/segment` - Segment one text into sentences
//! - `/segment-batch` - Segment several texts
//! - `/cache/clear` - Clear the result cache
//! - `/cache/stats` - Cache statistics
//! - `/model-info` - Model metadata with live cache statistics

pub mod error;
pub mod handlers;
pub mod routes;
pub mod types;

// Re-exports
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use handlers::{AppState, SharedState};
pub use routes::{create_router, print_routes};
pub use types::*;
