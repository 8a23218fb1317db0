//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use apptwice_auth::AuthGateway;
use apptwice_cache::CacheManager;
use apptwice_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Revocation cache, probed by the health endpoint
    pub cache: Arc<CacheManager>,
    /// Request-facing auth gateway
    pub gateway: Arc<AuthGateway>,
}

impl AppState {
    /// Bundle the shared dependencies.
    pub fn new(config: AppConfig, cache: Arc<CacheManager>, gateway: Arc<AuthGateway>) -> Self {
        Self {
            config: Arc::new(config),
            cache,
            gateway,
        }
    }
}
