//! Owner-facing share-link management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use waylog_database::repositories::share_link::ShareLinkFilter;
use waylog_service::share::service::CreateShareLinkRequest;

use crate::dto::request::{CreateShareLinkBody, ShareLinkListQuery};
use crate::dto::response::MintedShareLink;
use crate::error::ApiError;
use crate::extractors::{AuthOwner, PaginationParams};
use crate::state::AppState;

/// GET /api/share-links
pub async fn list_share_links(
    State(state): State<AppState>,
    auth: AuthOwner,
    Query(filter): Query<ShareLinkListQuery>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = state
        .share_service
        .list(
            auth.context(),
            ShareLinkFilter {
                scope: filter.scope,
                target_id: filter.target_id,
            },
            params.into_page_request(),
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": result })))
}

/// POST /api/share-links
pub async fn create_share_link(
    State(state): State<AppState>,
    auth: AuthOwner,
    Json(body): Json<CreateShareLinkBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let (link, token) = state
        .share_service
        .create(
            auth.context(),
            CreateShareLinkRequest {
                scope: body.scope,
                target_id: body.target_id,
                policy_overrides: body.policy.unwrap_or_else(|| json!({})),
                expires_at: body.expires_at,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": MintedShareLink::new(link, token) })),
    ))
}

/// GET /api/share-links/{id}
pub async fn get_share_link(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let link = state.share_service.get(auth.context(), id).await?;
    Ok(Json(json!({ "success": true, "data": link })))
}

/// DELETE /api/share-links/{id}
pub async fn revoke_share_link(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let link = state.share_service.revoke(auth.context(), id).await?;
    Ok(Json(json!({ "success": true, "data": link })))
}

/// POST /api/share-links/{id}/rotate
pub async fn rotate_share_link(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (link, token) = state.share_service.rotate(auth.context(), id).await?;

    Ok(Json(
        json!({ "success": true, "data": MintedShareLink::new(link, token) }),
    ))
}
