//! Share-link repository implementation.
//!
//! Revoke and rotate are single-row atomic UPDATEs; a redemption racing a
//! rotation sees either the old digest or the new one, never a mix.

use sqlx::PgPool;
use uuid::Uuid;

use waylog_core::error::{AppError, ErrorKind};
use waylog_core::result::AppResult;
use waylog_core::types::pagination::{PageRequest, PageResponse};
use waylog_entity::share::{CreateShareLink, ShareLink, ShareScope};

/// Optional filters for owner listings.
#[derive(Debug, Clone, Default)]
pub struct ShareLinkFilter {
    /// Restrict to one scope.
    pub scope: Option<ShareScope>,
    /// Restrict to links targeting one trip.
    pub target_id: Option<Uuid>,
}

/// Repository for share-link lifecycle and token-digest lookup.
#[derive(Debug, Clone)]
pub struct ShareLinkRepository {
    pool: PgPool,
}

impl ShareLinkRepository {
    /// Create a new share-link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new share link.
    pub async fn create(&self, data: &CreateShareLink) -> AppResult<ShareLink> {
        sqlx::query_as::<_, ShareLink>(
            "INSERT INTO share_links (owner_id, scope, target_id, token_digest, policy_overrides, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(data.scope)
        .bind(data.target_id)
        .bind(&data.token_digest)
        .bind(&data.policy_overrides)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create share link", e))
    }

    /// Find a share link by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ShareLink>> {
        sqlx::query_as::<_, ShareLink>("SELECT * FROM share_links WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share link", e)
            })
    }

    /// Find a share link by token digest.
    ///
    /// Liveness (revocation/expiry) is checked by the caller; the lookup
    /// itself matches dead links too so the access layer can coarsen all
    /// failures identically.
    pub async fn find_by_digest(&self, digest: &str) -> AppResult<Option<ShareLink>> {
        sqlx::query_as::<_, ShareLink>("SELECT * FROM share_links WHERE token_digest = $1")
            .bind(digest)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share link by digest", e)
            })
    }

    /// Mark a share link revoked. Already-revoked links keep their original
    /// revocation timestamp, so the call is idempotent.
    pub async fn revoke(&self, id: Uuid) -> AppResult<ShareLink> {
        sqlx::query_as::<_, ShareLink>(
            "UPDATE share_links SET revoked_at = COALESCE(revoked_at, NOW()) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke share link", e))
    }

    /// Replace the token digest and clear revocation in one atomic update.
    pub async fn rotate(&self, id: Uuid, new_digest: &str) -> AppResult<ShareLink> {
        sqlx::query_as::<_, ShareLink>(
            "UPDATE share_links SET token_digest = $2, revoked_at = NULL \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_digest)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rotate share link", e))
    }

    /// List an owner's share links, newest first.
    pub async fn find_by_owner(
        &self,
        owner_id: Uuid,
        filter: &ShareLinkFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareLink>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM share_links WHERE owner_id = $1 \
             AND ($2::share_scope IS NULL OR scope = $2) \
             AND ($3::uuid IS NULL OR target_id = $3)",
        )
        .bind(owner_id)
        .bind(filter.scope)
        .bind(filter.target_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count share links", e))?;

        let links = sqlx::query_as::<_, ShareLink>(
            "SELECT * FROM share_links WHERE owner_id = $1 \
             AND ($2::share_scope IS NULL OR scope = $2) \
             AND ($3::uuid IS NULL OR target_id = $3) \
             ORDER BY created_at DESC LIMIT $4 OFFSET $5",
        )
        .bind(owner_id)
        .bind(filter.scope)
        .bind(filter.target_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list share links", e))?;

        Ok(PageResponse::new(
            links,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
