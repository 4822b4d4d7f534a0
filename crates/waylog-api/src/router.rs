//! Route definitions for the Waylog HTTP API.
//!
//! Owner management routes live under `/api`; the public redemption route
//! sits at the root so shared URLs stay short.

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(share_link_routes())
        .merge(health_routes());

    let public_routes =
        Router::new().route("/share/{token}", get(handlers::public::redeem_share));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Owner-facing share-link management.
fn share_link_routes() -> Router<AppState> {
    Router::new()
        .route("/share-links", get(handlers::share::list_share_links))
        .route("/share-links", post(handlers::share::create_share_link))
        .route("/share-links/{id}", get(handlers::share::get_share_link))
        .route(
            "/share-links/{id}",
            delete(handlers::share::revoke_share_link),
        )
        .route(
            "/share-links/{id}/rotate",
            post(handlers::share::rotate_share_link),
        )
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let allowed = &state.config.server.allowed_origins;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    if allowed.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed.iter().filter_map(|o| o.parse().ok()).collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
