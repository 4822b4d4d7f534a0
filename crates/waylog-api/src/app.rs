//! Application builder — wires repositories, services, and state into an
//! Axum app, then serves it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::PgPool;

use waylog_core::config::AppConfig;
use waylog_core::error::AppError;
use waylog_database::repositories::media::MediaRepository;
use waylog_database::repositories::moment::MomentRepository;
use waylog_database::repositories::profile::ProfileRepository;
use waylog_database::repositories::share_link::ShareLinkRepository;
use waylog_database::repositories::trip::TripRepository;
use waylog_service::share::access::ShareAccessService;
use waylog_service::share::serializer::RedactionSerializer;
use waylog_service::share::service::ShareLinkService;
use waylog_storage::manager::StorageManager;

use crate::rate_limit::{FixedWindowLimiter, RateLimiter};
use crate::router::build_router;
use crate::state::AppState;

/// Build the application state from configuration and a database pool.
pub async fn build_state(config: AppConfig, db_pool: PgPool) -> Result<AppState, AppError> {
    let storage_manager = StorageManager::new(&config.storage).await?;

    let link_repo = Arc::new(ShareLinkRepository::new(db_pool.clone()));
    let trip_repo = Arc::new(TripRepository::new(db_pool.clone()));
    let moment_repo = Arc::new(MomentRepository::new(db_pool.clone()));
    let media_repo = Arc::new(MediaRepository::new(db_pool.clone()));
    let profile_repo = Arc::new(ProfileRepository::new(db_pool.clone()));

    let serializer = Arc::new(RedactionSerializer::new(
        trip_repo,
        moment_repo,
        media_repo,
        profile_repo,
        storage_manager.signer(),
        storage_manager.media_bucket().to_string(),
        Duration::from_secs(config.share.signed_url_ttl_seconds),
    ));

    let share_service = Arc::new(ShareLinkService::new(Arc::clone(&link_repo)));
    let access_service = Arc::new(ShareAccessService::new(link_repo, serializer));

    let rate_limiter: Arc<dyn RateLimiter> = Arc::new(FixedWindowLimiter::new(
        config.share.rate_limit_max_requests,
        config.share.rate_limit_window_seconds,
    ));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        share_service,
        access_service,
        rate_limiter,
    })
}

/// Build the complete Axum application.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Run the Waylog server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config, db_pool).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Waylog server listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
    }
}
