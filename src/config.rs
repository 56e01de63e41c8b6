//! Process-wide configuration assembled from the environment.

use std::net::SocketAddr;

use crate::cache::CacheConfig;
use crate::segmenter::SegmenterConfig;
use crate::services::SchedulerConfig;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8087;

/// Everything `main` needs to build the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub cache: CacheConfig,
    pub scheduler: SchedulerConfig,
    pub segmenter: SegmenterConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cache: CacheConfig::default(),
            scheduler: SchedulerConfig::default(),
            segmenter: SegmenterConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables
    pub fn from_env() -> Self {
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            cache: CacheConfig::from_env(),
            scheduler: SchedulerConfig::from_env(),
            segmenter: SegmenterConfig::from_env(),
        }
    }

    /// Address to bind, on all interfaces
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
