//! Public, unauthenticated share redemption.
//!
//! This is the hostile-traffic surface: every response carries
//! `Cache-Control: no-store`, rate-limit denials return 429 with a
//! `Retry-After`, and every dead-link reason collapses into one 404.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::{ApiError, ApiErrorResponse};
use crate::state::AppState;

/// GET /share/{token}
pub async fn redeem_share(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(token): Path<String>,
) -> Response {
    let key = rate_limit_key(&headers, peer, &token);
    let decision = state.rate_limiter.check(&key);

    if !decision.allowed {
        let retry_after = decision.retry_after_seconds.unwrap_or(1);
        tracing::warn!(key = %key, retry_after, "Share redemption rate limited");
        return rate_limited_response(retry_after);
    }

    match state.access_service.redeem(&token).await {
        Ok(payload) => no_store(Json(json!({ "success": true, "data": payload }))),
        Err(err) => no_store(ApiError(err)),
    }
}

/// Compose the throttling key from client address, forwarded host, and token.
///
/// Honors `X-Forwarded-For` (first hop) ahead of the socket peer so the
/// limiter still distinguishes clients behind a reverse proxy.
fn rate_limit_key(headers: &HeaderMap, peer: SocketAddr, token: &str) -> String {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| peer.ip().to_string());

    let host = headers
        .get("x-forwarded-host")
        .or_else(|| headers.get(header::HOST))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    format!("{ip}:{host}:{token}")
}

fn rate_limited_response(retry_after: u64) -> Response {
    let body = ApiErrorResponse {
        error: "RATE_LIMITED".to_string(),
        message: "Too many requests; slow down".to_string(),
    };

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    let headers = response.headers_mut();
    headers.insert(header::RETRY_AFTER, retry_after.into());
    headers.insert(header::CACHE_CONTROL, "no-store".parse().unwrap());
    response
}

/// Stamp `Cache-Control: no-store` on any public response.
fn no_store(inner: impl IntoResponse) -> Response {
    let mut response = inner.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, "no-store".parse().unwrap());
    response
}
