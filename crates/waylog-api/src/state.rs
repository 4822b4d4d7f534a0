//! Shared application state threaded through every handler.

use std::sync::Arc;

use sqlx::PgPool;

use waylog_core::config::AppConfig;
use waylog_service::share::access::ShareAccessService;
use waylog_service::share::service::ShareLinkService;

use crate::rate_limit::RateLimiter;

/// Application-wide shared state.
///
/// Cheap to clone: everything inside is an `Arc` or a pooled handle.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Database pool, exposed for health checks.
    pub db_pool: PgPool,
    /// Owner-facing share-link lifecycle.
    pub share_service: Arc<ShareLinkService>,
    /// Guest-facing token redemption.
    pub access_service: Arc<ShareAccessService>,
    /// Throttle for the public redemption endpoint.
    pub rate_limiter: Arc<dyn RateLimiter>,
}
