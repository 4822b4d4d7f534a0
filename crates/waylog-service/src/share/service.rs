//! Share-link lifecycle service: create, revoke, rotate, list.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use waylog_core::error::AppError;
use waylog_core::result::AppResult;
use waylog_core::types::pagination::{PageRequest, PageResponse};
use waylog_database::repositories::share_link::{ShareLinkFilter, ShareLinkRepository};
use waylog_entity::share::{CreateShareLink, ShareLink, ShareScope};

use super::token::TokenCodec;
use crate::context::RequestContext;

/// Request to create a new share link.
#[derive(Debug, Clone)]
pub struct CreateShareLinkRequest {
    /// Trip or profile scope.
    pub scope: ShareScope,
    /// Target trip; required for trip scope, forbidden for profile scope.
    pub target_id: Option<Uuid>,
    /// Sparse policy override map.
    pub policy_overrides: serde_json::Value,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Manages share-link lifecycle on behalf of authenticated owners.
///
/// Every operation here is owner-scoped; unauthenticated token resolution
/// lives in the access service.
#[derive(Debug, Clone)]
pub struct ShareLinkService {
    /// Share-link repository.
    links: Arc<ShareLinkRepository>,
    /// Token minting and digesting.
    codec: TokenCodec,
}

impl ShareLinkService {
    /// Create a new share-link service.
    pub fn new(links: Arc<ShareLinkRepository>) -> Self {
        Self {
            links,
            codec: TokenCodec::new(),
        }
    }

    /// Create a share link and return it with the one-time raw token.
    ///
    /// This is the only moment (besides rotation) the raw token exists
    /// server-side; it is never persisted or logged.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateShareLinkRequest,
    ) -> AppResult<(ShareLink, String)> {
        match req.scope {
            ShareScope::Trip if req.target_id.is_none() => {
                return Err(AppError::validation(
                    "target_id is required for trip-scope links",
                ));
            }
            ShareScope::Profile if req.target_id.is_some() => {
                return Err(AppError::validation(
                    "target_id must be empty for profile-scope links",
                ));
            }
            _ => {}
        }

        let (raw_token, digest) = self.codec.mint();

        let link = self
            .links
            .create(&CreateShareLink {
                owner_id: ctx.owner_id,
                scope: req.scope,
                target_id: req.target_id,
                token_digest: digest,
                policy_overrides: req.policy_overrides,
                expires_at: req.expires_at,
            })
            .await?;

        info!(
            owner_id = %ctx.owner_id,
            link_id = %link.id,
            scope = ?link.scope,
            "Share link created"
        );

        Ok((link, raw_token))
    }

    /// Get one of the caller's links by id.
    pub async fn get(&self, ctx: &RequestContext, link_id: Uuid) -> AppResult<ShareLink> {
        let link = self
            .links
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share link not found"))?;

        if link.owner_id != ctx.owner_id {
            return Err(AppError::authorization(
                "You can only manage your own share links",
            ));
        }

        Ok(link)
    }

    /// Revoke a link. Revoking an already-revoked link is a no-op success.
    pub async fn revoke(&self, ctx: &RequestContext, link_id: Uuid) -> AppResult<ShareLink> {
        self.get(ctx, link_id).await?;

        let link = self.links.revoke(link_id).await?;

        info!(owner_id = %ctx.owner_id, link_id = %link_id, "Share link revoked");

        Ok(link)
    }

    /// Rotate a link's token: the old raw token stops resolving the instant
    /// the update commits, and any revocation is cleared.
    pub async fn rotate(
        &self,
        ctx: &RequestContext,
        link_id: Uuid,
    ) -> AppResult<(ShareLink, String)> {
        self.get(ctx, link_id).await?;

        let (raw_token, digest) = self.codec.mint();
        let link = self.links.rotate(link_id, &digest).await?;

        info!(owner_id = %ctx.owner_id, link_id = %link_id, "Share link rotated");

        Ok((link, raw_token))
    }

    /// Resolve a raw token to its link, live or not.
    ///
    /// Returns `None` for unknown and malformed tokens alike; callers must
    /// not be able to distinguish the two.
    pub async fn resolve_by_token(&self, raw_token: &str) -> AppResult<Option<ShareLink>> {
        let digest = self.codec.digest(raw_token);
        self.links.find_by_digest(&digest).await
    }

    /// List the caller's links, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: ShareLinkFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<ShareLink>> {
        self.links.find_by_owner(ctx.owner_id, &filter, &page).await
    }
}
