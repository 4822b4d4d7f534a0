//! Media repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use waylog_core::error::{AppError, ErrorKind};
use waylog_core::result::AppResult;
use waylog_entity::media::MediaAsset;

/// Repository for media-attachment reads.
#[derive(Debug, Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    /// Create a new media repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List media for a set of moments, grouped by moment and ordered by
    /// position within each.
    pub async fn list_by_moments(&self, moment_ids: &[Uuid]) -> AppResult<Vec<MediaAsset>> {
        if moment_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, MediaAsset>(
            "SELECT * FROM media_assets WHERE moment_id = ANY($1) \
             ORDER BY moment_id, position ASC, created_at ASC",
        )
        .bind(moment_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list media", e))
    }

    /// Count media attached to a trip's non-deleted moments.
    pub async fn count_live_by_trip(&self, trip_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM media_assets a \
             JOIN moments m ON m.id = a.moment_id \
             WHERE m.trip_id = $1 AND m.deleted_at IS NULL",
        )
        .bind(trip_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count media", e))
    }

    /// Per-trip media counts across an owner's non-deleted trips.
    pub async fn counts_by_trip_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<(Uuid, i64)>> {
        sqlx::query_as(
            "SELECT m.trip_id, COUNT(*) FROM media_assets a \
             JOIN moments m ON m.id = a.moment_id \
             JOIN trips t ON t.id = m.trip_id \
             WHERE t.owner_id = $1 AND t.deleted_at IS NULL AND m.deleted_at IS NULL \
             GROUP BY m.trip_id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count media", e))
    }

    /// Count media across an owner's non-deleted trips and moments.
    pub async fn count_live_by_owner(&self, owner_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM media_assets a \
             JOIN moments m ON m.id = a.moment_id \
             JOIN trips t ON t.id = m.trip_id \
             WHERE t.owner_id = $1 AND t.deleted_at IS NULL AND m.deleted_at IS NULL",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count media", e))
    }
}
